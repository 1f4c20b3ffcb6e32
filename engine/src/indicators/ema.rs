// Exponential Moving Average (EMA) indicator implementation
use super::{ensure_period, window, IndicatorCalculator, IndicatorOutput};
use crate::error::IndicatorError;
use crate::models::PriceSeries;
use shared::models::IndicatorParams;

/// EMA weighted over the entire supplied history, not a truncated window.
/// The recursion is seeded with the first close of the series.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        Ok(Self {
            period: ensure_period("period", period)?,
        })
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> String {
        format!("EMA({})", self.period)
    }

    fn parameters(&self) -> IndicatorParams {
        IndicatorParams::from([("period".to_string(), self.period as f64)])
    }

    fn required_lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput, IndicatorError> {
        self.ensure_lookback(series)?;
        let ema = window::ema_series(series.closes(), self.period);
        let value = ema[ema.len() - 1];
        IndicatorOutput::new(value).ensure_finite(self.period, series.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::series_from_closes;

    #[test]
    fn test_ema_calculation() {
        let series = series_from_closes(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let ema = Ema::new(3).unwrap(); // alpha 0.5
        // 10 -> 10.5 -> 11.25 -> 12.125 -> 13.0625
        assert_eq!(ema.compute(&series).unwrap().primary, 13.0625);
    }

    #[test]
    fn test_ema_uses_whole_history() {
        // Same last three closes, different earlier history => different EMA
        let a = series_from_closes(&[1.0, 1.0, 5.0, 6.0, 7.0]);
        let b = series_from_closes(&[9.0, 9.0, 5.0, 6.0, 7.0]);
        let ema = Ema::new(3).unwrap();
        assert_ne!(ema.compute(&a).unwrap().primary, ema.compute(&b).unwrap().primary);
    }

    #[test]
    fn test_ema_constant_series() {
        let series = series_from_closes(&[42.5; 12]);
        assert_eq!(Ema::new(12).unwrap().compute(&series).unwrap().primary, 42.5);
    }

    #[test]
    fn test_ema_insufficient_data() {
        let series = series_from_closes(&[1.0; 11]);
        let err = Ema::new(12).unwrap().compute(&series).unwrap_err();
        assert_eq!(err, IndicatorError::InsufficientData { required: 12, available: 11 });
    }
}
