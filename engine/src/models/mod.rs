// Engine-side views over the shared bar model.
pub mod price_series;

pub use price_series::PriceSeries;
