// Identifier -> indicator kind + default parameters.
use shared::models::{IndicatorParams, IndicatorSpec};
use std::collections::HashMap;

use crate::error::IndicatorError;
use crate::indicators::{IndicatorCalculator, IndicatorKind};

/// Identifiers available out of the box, with the period overrides that give
/// `sma_20` and `ema_12` their names.
const BUILTINS: [(&str, IndicatorKind, &[(&str, f64)]); 8] = [
    ("sma_20", IndicatorKind::Sma, &[("period", 20.0)]),
    ("ema_12", IndicatorKind::Ema, &[("period", 12.0)]),
    ("rsi", IndicatorKind::Rsi, &[]),
    ("macd", IndicatorKind::Macd, &[]),
    ("bollinger_bands", IndicatorKind::BollingerBands, &[]),
    ("stochastic", IndicatorKind::Stochastic, &[]),
    ("williams_r", IndicatorKind::WilliamsR, &[]),
    ("atr", IndicatorKind::Atr, &[]),
];

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub kind: IndicatorKind,
    /// Label reported as `IndicatorResult::indicator_type`.
    pub indicator_type: String,
    pub defaults: IndicatorParams,
}

/// A request bound to its calculator, ready to run.
pub struct ResolvedIndicator {
    pub identifier: String,
    pub indicator_type: String,
    pub calculator: Box<dyn IndicatorCalculator>,
}

#[derive(Debug, Clone)]
pub struct IndicatorRegistry {
    entries: HashMap<String, RegistryEntry>,
}

fn normalize(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// Overlays `overrides` on the kind's defaults, rejecting names the kind does not take.
fn merge_parameters(
    kind: IndicatorKind,
    base: &IndicatorParams,
    overrides: &IndicatorParams,
) -> Result<IndicatorParams, IndicatorError> {
    let mut merged = base.clone();
    for (name, value) in overrides {
        if !merged.contains_key(name) {
            return Err(IndicatorError::invalid_parameter(name, format!("not a parameter of {}", kind)));
        }
        merged.insert(name.clone(), *value);
    }
    Ok(merged)
}

impl IndicatorRegistry {
    pub fn empty() -> Self {
        IndicatorRegistry { entries: HashMap::new() }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (identifier, kind, overrides) in BUILTINS {
            let mut defaults = kind.default_parameters();
            defaults.extend(overrides.iter().map(|(k, v)| (k.to_string(), *v)));
            registry.entries.insert(
                identifier.to_string(),
                RegistryEntry {
                    kind,
                    indicator_type: identifier.to_uppercase(),
                    defaults,
                },
            );
        }
        registry
    }

    /// Adds (or replaces) an identifier. The parameters are validated by
    /// building the calculator once, so a bad entry fails here rather than on
    /// every request.
    pub fn register(
        &mut self,
        identifier: &str,
        kind: IndicatorKind,
        overrides: &IndicatorParams,
    ) -> Result<(), IndicatorError> {
        let key = normalize(identifier);
        if key.is_empty() {
            return Err(IndicatorError::UnknownIndicator(identifier.to_string()));
        }
        let defaults = merge_parameters(kind, &kind.default_parameters(), overrides)?;
        kind.build(&defaults)?;

        tracing::debug!(identifier = %key, %kind, "Registered indicator");
        self.entries.insert(
            key.clone(),
            RegistryEntry {
                kind,
                indicator_type: key.to_uppercase(),
                defaults,
            },
        );
        Ok(())
    }

    pub fn lookup(&self, identifier: &str) -> Result<&RegistryEntry, IndicatorError> {
        self.entries
            .get(&normalize(identifier))
            .ok_or_else(|| IndicatorError::UnknownIndicator(identifier.to_string()))
    }

    /// Looks up the request's identifier, merges its parameters over the entry's
    /// defaults and builds the calculator.
    pub fn resolve(&self, spec: &IndicatorSpec) -> Result<ResolvedIndicator, IndicatorError> {
        let entry = self.lookup(&spec.identifier)?;
        let params = merge_parameters(entry.kind, &entry.defaults, &spec.parameters)?;
        let calculator = entry.kind.build(&params)?;
        Ok(ResolvedIndicator {
            identifier: spec.identifier.clone(),
            indicator_type: entry.indicator_type.clone(),
            calculator,
        })
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(&normalize(identifier))
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
