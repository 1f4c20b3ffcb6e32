// Technical indicators module
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod williams_r;
pub mod window;

#[cfg(test)]
pub(crate) mod test_support;

pub use atr::Atr;
pub use bollinger::BollingerBands;
pub use ema::Ema;
pub use macd::Macd;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::Stochastic;
pub use williams_r::WilliamsR;

use serde::{Deserialize, Serialize};
use shared::models::IndicatorParams;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::IndicatorError;
use crate::models::PriceSeries;

/// Value produced by a calculator: a primary scalar plus named secondary values.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorOutput {
    pub primary: f64,
    pub metadata: BTreeMap<String, f64>,
}

impl IndicatorOutput {
    pub fn new(primary: f64) -> Self {
        IndicatorOutput {
            primary,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// Rejects the output if any field is NaN or infinite. A non-finite value is
    /// reported as insufficient data, never handed to a caller.
    pub fn ensure_finite(self, required: usize, available: usize) -> Result<Self, IndicatorError> {
        if self.primary.is_finite() && self.metadata.values().all(|v| v.is_finite()) {
            Ok(self)
        } else {
            Err(IndicatorError::InsufficientData { required, available })
        }
    }
}

// Common trait for all indicators. A calculator is built with its parameters
// already bound and computes a single value at the end of the series.
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> String;

    /// Effective parameters this instance computes with.
    fn parameters(&self) -> IndicatorParams;

    /// Minimum number of bars needed before a value can be produced.
    fn required_lookback(&self) -> usize;

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput, IndicatorError>;

    fn ensure_lookback(&self, series: &PriceSeries) -> Result<(), IndicatorError> {
        let required = self.required_lookback();
        if series.len() < required {
            return Err(IndicatorError::InsufficientData {
                required,
                available: series.len(),
            });
        }
        Ok(())
    }
}

/// The closed set of indicator families the engine knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Sma,
    Ema,
    Rsi,
    Macd,
    BollingerBands,
    Stochastic,
    WilliamsR,
    Atr,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 8] = [
        IndicatorKind::Sma,
        IndicatorKind::Ema,
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::BollingerBands,
        IndicatorKind::Stochastic,
        IndicatorKind::WilliamsR,
        IndicatorKind::Atr,
    ];

    /// Parameter names and their defaults. Also defines which names a request may override.
    pub fn default_parameters(&self) -> IndicatorParams {
        let pairs: &[(&str, f64)] = match self {
            IndicatorKind::Sma => &[("period", 20.0)],
            IndicatorKind::Ema => &[("period", 12.0)],
            IndicatorKind::Rsi => &[("period", 14.0)],
            IndicatorKind::Macd => &[("fast", 12.0), ("slow", 26.0), ("signal", 9.0)],
            IndicatorKind::BollingerBands => &[("period", 20.0), ("std_dev", 2.0)],
            IndicatorKind::Stochastic => &[("period", 14.0)],
            IndicatorKind::WilliamsR => &[("period", 14.0)],
            IndicatorKind::Atr => &[("period", 14.0)],
        };
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    pub fn build(&self, params: &IndicatorParams) -> Result<Box<dyn IndicatorCalculator>, IndicatorError> {
        Ok(match self {
            IndicatorKind::Sma => Box::new(Sma::new(period_param(params, "period")?)?),
            IndicatorKind::Ema => Box::new(Ema::new(period_param(params, "period")?)?),
            IndicatorKind::Rsi => Box::new(Rsi::new(period_param(params, "period")?)?),
            IndicatorKind::Macd => Box::new(Macd::new(
                period_param(params, "fast")?,
                period_param(params, "slow")?,
                period_param(params, "signal")?,
            )?),
            IndicatorKind::BollingerBands => Box::new(BollingerBands::new(
                period_param(params, "period")?,
                positive_param(params, "std_dev")?,
            )?),
            IndicatorKind::Stochastic => Box::new(Stochastic::new(period_param(params, "period")?)?),
            IndicatorKind::WilliamsR => Box::new(WilliamsR::new(period_param(params, "period")?)?),
            IndicatorKind::Atr => Box::new(Atr::new(period_param(params, "period")?)?),
        })
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IndicatorKind::Sma => "SMA",
            IndicatorKind::Ema => "EMA",
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::BollingerBands => "BOLLINGER_BANDS",
            IndicatorKind::Stochastic => "STOCHASTIC",
            IndicatorKind::WilliamsR => "WILLIAMS_R",
            IndicatorKind::Atr => "ATR",
        };
        f.write_str(label)
    }
}

/// Largest window a calculator accepts; `period_param` applies the same bound.
pub const MAX_PERIOD: usize = u32::MAX as usize;

pub(crate) fn ensure_period(name: &str, period: usize) -> Result<usize, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::invalid_parameter(name, "must be greater than 0"));
    }
    if period > MAX_PERIOD {
        return Err(IndicatorError::invalid_parameter(
            name,
            format!("must be at most {}, got {}", MAX_PERIOD, period),
        ));
    }
    Ok(period)
}

fn require(params: &IndicatorParams, name: &str) -> Result<f64, IndicatorError> {
    let value = *params
        .get(name)
        .ok_or_else(|| IndicatorError::invalid_parameter(name, "missing"))?;
    if !value.is_finite() {
        return Err(IndicatorError::invalid_parameter(name, format!("must be finite, got {}", value)));
    }
    Ok(value)
}

/// Reads a window length: a positive whole number.
pub fn period_param(params: &IndicatorParams, name: &str) -> Result<usize, IndicatorError> {
    let value = require(params, name)?;
    if value < 1.0 || value.fract() != 0.0 || value > MAX_PERIOD as f64 {
        return Err(IndicatorError::invalid_parameter(
            name,
            format!("must be a positive whole number, got {}", value),
        ));
    }
    Ok(value as usize)
}

/// Reads a strictly positive multiplier such as `std_dev`.
pub fn positive_param(params: &IndicatorParams, name: &str) -> Result<f64, IndicatorError> {
    let value = require(params, name)?;
    if value <= 0.0 {
        return Err(IndicatorError::invalid_parameter(name, format!("must be greater than 0, got {}", value)));
    }
    Ok(value)
}
