// Technical-indicator engine library root.
//
// A `PriceSeries` (models) is handed to the `IndicatorEngine` (services)
// together with a list of `IndicatorSpec`s; each spec is resolved through the
// `IndicatorRegistry` to one of the calculators in `indicators`. Loading and
// preparing bars (data) and settings (config) sit outside that core.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod models;
pub mod services;

pub use error::{EngineError, IndicatorError};
pub use models::PriceSeries;
pub use services::{EvaluationReport, IndicatorEngine, IndicatorRegistry};
