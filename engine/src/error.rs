use thiserror::Error;

/// Failure of a single indicator. The engine drops the offending entry from a
/// batch instead of aborting it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Insufficient data: {required} bars required, {available} available")]
    InsufficientData { required: usize, available: usize },

    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl IndicatorError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        IndicatorError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),
}
