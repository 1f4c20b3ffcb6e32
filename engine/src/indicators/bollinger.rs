// Bollinger Bands indicator implementation
use super::{ensure_period, window, IndicatorCalculator, IndicatorOutput};
use crate::error::IndicatorError;
use crate::models::PriceSeries;
use shared::models::IndicatorParams;

/// Middle band is the SMA of the window; the bands sit `std_dev` population
/// standard deviations of the same window above and below it.
pub struct BollingerBands {
    period: usize,
    std_dev: f64,
}

impl BollingerBands {
    pub fn new(period: usize, std_dev: f64) -> Result<Self, IndicatorError> {
        let period = ensure_period("period", period)?;
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(IndicatorError::invalid_parameter(
                "std_dev",
                format!("must be greater than 0, got {}", std_dev),
            ));
        }
        Ok(Self { period, std_dev })
    }
}

impl IndicatorCalculator for BollingerBands {
    fn name(&self) -> String {
        format!("BB({},{})", self.period, self.std_dev)
    }

    fn parameters(&self) -> IndicatorParams {
        IndicatorParams::from([
            ("period".to_string(), self.period as f64),
            ("std_dev".to_string(), self.std_dev),
        ])
    }

    fn required_lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput, IndicatorError> {
        self.ensure_lookback(series)?;
        let closes = window::last(series.closes(), self.period);

        let middle = window::mean(closes);
        let half_width = self.std_dev * window::population_std_dev(closes);
        let upper = middle + half_width;
        let lower = middle - half_width;

        IndicatorOutput::new(middle)
            .with("upper_band", upper)
            .with("middle_band", middle)
            .with("lower_band", lower)
            .ensure_finite(self.period, series.len())
    }
}
