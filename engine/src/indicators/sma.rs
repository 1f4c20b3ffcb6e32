// Simple Moving Average (SMA) indicator implementation
use super::{ensure_period, window, IndicatorCalculator, IndicatorOutput};
use crate::error::IndicatorError;
use crate::models::PriceSeries;
use shared::models::IndicatorParams;

pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        Ok(Self {
            period: ensure_period("period", period)?,
        })
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> String {
        format!("SMA({})", self.period)
    }

    fn parameters(&self) -> IndicatorParams {
        IndicatorParams::from([("period".to_string(), self.period as f64)])
    }

    fn required_lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput, IndicatorError> {
        self.ensure_lookback(series)?;
        let value = window::mean(window::last(series.closes(), self.period));
        IndicatorOutput::new(value).ensure_finite(self.period, series.len())
    }
}
