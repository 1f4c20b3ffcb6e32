// Stochastic Oscillator indicator implementation
use super::{ensure_period, window, IndicatorCalculator, IndicatorOutput};
use crate::error::IndicatorError;
use crate::models::PriceSeries;
use shared::models::IndicatorParams;

const D_SMOOTHING: usize = 3;

/// %K compares the last close with the high/low range of the window; %D is the
/// 3-bar SMA of %K. A zero-range window resolves %K to 50.
///
/// %D is only reported when three full %K windows fit in the series.
pub struct Stochastic {
    period: usize,
}

impl Stochastic {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        Ok(Self {
            period: ensure_period("period", period)?,
        })
    }

    /// %K for the window ending at bar `end` (inclusive).
    fn k_at(&self, series: &PriceSeries, end: usize) -> f64 {
        let start = end + 1 - self.period;
        let highest_high = window::highest(&series.highs()[start..=end]);
        let lowest_low = window::lowest(&series.lows()[start..=end]);
        let range = highest_high - lowest_low;
        if range == 0.0 {
            return 50.0;
        }
        100.0 * (series.closes()[end] - lowest_low) / range
    }
}

impl IndicatorCalculator for Stochastic {
    fn name(&self) -> String {
        format!("STOCH({})", self.period)
    }

    fn parameters(&self) -> IndicatorParams {
        IndicatorParams::from([("period".to_string(), self.period as f64)])
    }

    fn required_lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput, IndicatorError> {
        self.ensure_lookback(series)?;
        let last = series.len() - 1;
        let k = self.k_at(series, last);

        let mut output = IndicatorOutput::new(k).with("k_percent", k);
        if series.len() >= self.period.saturating_add(D_SMOOTHING - 1) {
            let d = (0..D_SMOOTHING).map(|offset| self.k_at(series, last - offset)).sum::<f64>() / D_SMOOTHING as f64;
            output = output.with("d_percent", d);
        }
        output.ensure_finite(self.period, series.len())
    }
}
