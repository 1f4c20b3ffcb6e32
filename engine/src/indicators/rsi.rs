// Relative Strength Index (RSI) indicator implementation
use super::{ensure_period, IndicatorCalculator, IndicatorOutput};
use crate::error::IndicatorError;
use crate::models::PriceSeries;
use shared::models::IndicatorParams;

pub const OVERBOUGHT: f64 = 70.0;
pub const OVERSOLD: f64 = 30.0;

/// RSI over plain rolling means of gains and losses across the last `period`
/// close-to-close changes. This is deliberately not Wilder's smoothing.
///
/// Zero mean loss resolves to 100 (or 50 when there was no movement at all)
/// instead of dividing by zero.
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        Ok(Self {
            period: ensure_period("period", period)?,
        })
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> String {
        format!("RSI({})", self.period)
    }

    fn parameters(&self) -> IndicatorParams {
        IndicatorParams::from([("period".to_string(), self.period as f64)])
    }

    fn required_lookback(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput, IndicatorError> {
        self.ensure_lookback(series)?;
        let closes = series.closes();

        let mut gains = 0.0;
        let mut losses = 0.0;
        for i in (closes.len() - self.period)..closes.len() {
            let change = closes[i] - closes[i - 1];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change; // losses are positive values
            }
        }

        let avg_gain = gains / self.period as f64;
        let avg_loss = losses / self.period as f64;

        let rsi = if avg_loss == 0.0 {
            if avg_gain == 0.0 { 50.0 } else { 100.0 }
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - (100.0 / (1.0 + rs))
        };

        IndicatorOutput::new(rsi)
            .with("overbought", OVERBOUGHT)
            .with("oversold", OVERSOLD)
            .ensure_finite(self.required_lookback(), series.len())
    }
}
