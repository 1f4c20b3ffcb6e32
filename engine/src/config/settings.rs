// Engine settings, loaded from a JSON file
use serde::{Deserialize, Deserializer};
use shared::models::{IndicatorParams, IndicatorSpec};
use std::fs;
use std::path::Path;

use crate::error::EngineError;
use crate::indicators::IndicatorKind;
use crate::services::IndicatorRegistry;

/// Request list used when neither the command line nor the settings file names one.
pub const DEFAULT_INDICATORS: [&str; 5] = ["sma_20", "ema_12", "rsi", "macd", "bollinger_bands"];

/// An extra registry identifier, e.g. `{"identifier": "sma_50", "kind": "sma", "parameters": {"period": 50}}`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CustomIndicator {
    pub identifier: String,
    pub kind: IndicatorKind,
    #[serde(default)]
    pub parameters: IndicatorParams,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    /// Requests to evaluate; entries may be bare identifiers or full specs.
    #[serde(deserialize_with = "deserialize_requests")]
    pub indicators: Vec<IndicatorSpec>,
    /// Most recent bars kept when loading history.
    pub max_bars: usize,
    pub parallel: bool,
    pub csv_delimiter: String, // Should be char, but JSON string is easier
    pub custom_indicators: Vec<CustomIndicator>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            indicators: DEFAULT_INDICATORS.iter().map(|id| IndicatorSpec::new(*id)).collect(),
            max_bars: 200,
            parallel: false,
            csv_delimiter: ",".to_string(),
            custom_indicators: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequestEntry {
    Identifier(String),
    Spec(IndicatorSpec),
}

fn deserialize_requests<'de, D>(deserializer: D) -> Result<Vec<IndicatorSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<RequestEntry>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            RequestEntry::Identifier(id) => IndicatorSpec::new(id),
            RequestEntry::Spec(spec) => spec,
        })
        .collect())
}

impl EngineSettings {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&contents)
            .map_err(|e| EngineError::ConfigError(format!("{}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), indicators = settings.indicators.len(), "Loaded engine settings");
        Ok(settings)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings =
            serde_json::from_str(contents).map_err(|e| EngineError::ConfigError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_bars == 0 {
            return Err(EngineError::ConfigError("max_bars must be greater than 0".to_string()));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8, EngineError> {
        match self.csv_delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(EngineError::ConfigError(format!(
                "csv_delimiter must be a single ASCII character, got {:?}",
                self.csv_delimiter
            ))),
        }
    }

    /// Built-in identifiers plus the configured custom ones.
    pub fn build_registry(&self) -> Result<IndicatorRegistry, EngineError> {
        let mut registry = IndicatorRegistry::with_builtins();
        for custom in &self.custom_indicators {
            registry
                .register(&custom.identifier, custom.kind, &custom.parameters)
                .map_err(|e| EngineError::ConfigError(format!("custom indicator '{}': {}", custom.identifier, e)))?;
        }
        Ok(registry)
    }
}
