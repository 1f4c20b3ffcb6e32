// Average True Range (ATR) indicator implementation
use super::{ensure_period, window, IndicatorCalculator, IndicatorOutput};
use crate::error::IndicatorError;
use crate::models::PriceSeries;
use shared::models::IndicatorParams;

/// Simple mean of the true range over the last `period` bars. Every bar in the
/// window needs the previous close, hence one extra bar of lookback.
pub struct Atr {
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        Ok(Self {
            period: ensure_period("period", period)?,
        })
    }
}

/// max(high - low, |high - prev_close|, |low - prev_close|)
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low).max((high - prev_close).abs()).max((low - prev_close).abs())
}

impl IndicatorCalculator for Atr {
    fn name(&self) -> String {
        format!("ATR({})", self.period)
    }

    fn parameters(&self) -> IndicatorParams {
        IndicatorParams::from([("period".to_string(), self.period as f64)])
    }

    fn required_lookback(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput, IndicatorError> {
        self.ensure_lookback(series)?;
        let (highs, lows, closes) = (series.highs(), series.lows(), series.closes());

        let ranges: Vec<f64> = ((series.len() - self.period)..series.len())
            .map(|i| true_range(highs[i], lows[i], closes[i - 1]))
            .collect();

        IndicatorOutput::new(window::mean(&ranges)).ensure_finite(self.required_lookback(), series.len())
    }
}
