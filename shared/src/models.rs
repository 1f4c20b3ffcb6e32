use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named numeric settings for an indicator (`period`, `fast`, `slow`, `signal`, `std_dev`).
pub type IndicatorParams = BTreeMap<String, f64>;

/// One trading interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl PriceBar {
    pub fn new(date: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: Option<u64>) -> Self {
        PriceBar { date, open, high, low, close, volume }
    }
}

/// A single requested indicator: a registry identifier plus optional parameter overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    pub identifier: String,
    #[serde(default)]
    pub parameters: IndicatorParams,
}

impl IndicatorSpec {
    pub fn new(identifier: impl Into<String>) -> Self {
        IndicatorSpec {
            identifier: identifier.into(),
            parameters: IndicatorParams::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }
}

impl From<&str> for IndicatorSpec {
    fn from(identifier: &str) -> Self {
        IndicatorSpec::new(identifier)
    }
}

/// A computed indicator value. Every numeric field is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub indicator_type: String,
    pub primary_value: f64,
    pub metadata: BTreeMap<String, f64>,
    pub computed_at: DateTime<Utc>,
}
