// Indicator services: identifier resolution and batch evaluation.
pub mod indicator_engine;
pub mod registry;

pub use indicator_engine::{EvaluationReport, IndicatorEngine, IndicatorFailure};
pub use registry::{IndicatorRegistry, RegistryEntry, ResolvedIndicator};
