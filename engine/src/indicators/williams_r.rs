// Williams %R indicator implementation
use super::{ensure_period, window, IndicatorCalculator, IndicatorOutput};
use crate::error::IndicatorError;
use crate::models::PriceSeries;
use shared::models::IndicatorParams;

/// Reported when the window has no range, matching the stochastic oscillator.
const ZERO_RANGE_VALUE: f64 = 50.0;

pub struct WilliamsR {
    period: usize,
}

impl WilliamsR {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        Ok(Self {
            period: ensure_period("period", period)?,
        })
    }
}

impl IndicatorCalculator for WilliamsR {
    fn name(&self) -> String {
        format!("WILLR({})", self.period)
    }

    fn parameters(&self) -> IndicatorParams {
        IndicatorParams::from([("period".to_string(), self.period as f64)])
    }

    fn required_lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput, IndicatorError> {
        self.ensure_lookback(series)?;
        let highest_high = window::highest(window::last(series.highs(), self.period));
        let lowest_low = window::lowest(window::last(series.lows(), self.period));
        let close = series.closes()[series.len() - 1];

        let range = highest_high - lowest_low;
        let value = if range == 0.0 {
            ZERO_RANGE_VALUE
        } else {
            -100.0 * (highest_high - close) / range
        };

        IndicatorOutput::new(value).ensure_finite(self.period, series.len())
    }
}
