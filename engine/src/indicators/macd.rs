// Moving Average Convergence Divergence (MACD) indicator implementation
use super::{ensure_period, window, IndicatorCalculator, IndicatorOutput};
use crate::error::IndicatorError;
use crate::models::PriceSeries;
use shared::models::IndicatorParams;

/// MACD line = EMA(fast) - EMA(slow), both over the whole history.
/// Signal line = EMA(signal) over the MACD line series; histogram = MACD - signal.
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Result<Self, IndicatorError> {
        let fast = ensure_period("fast", fast)?;
        let slow = ensure_period("slow", slow)?;
        let signal = ensure_period("signal", signal)?;
        if fast >= slow {
            return Err(IndicatorError::invalid_parameter(
                "fast",
                format!("must be shorter than slow ({} >= {})", fast, slow),
            ));
        }
        Ok(Self { fast, slow, signal })
    }
}

impl IndicatorCalculator for Macd {
    fn name(&self) -> String {
        format!("MACD({},{},{})", self.fast, self.slow, self.signal)
    }

    fn parameters(&self) -> IndicatorParams {
        IndicatorParams::from([
            ("fast".to_string(), self.fast as f64),
            ("slow".to_string(), self.slow as f64),
            ("signal".to_string(), self.signal as f64),
        ])
    }

    fn required_lookback(&self) -> usize {
        self.slow
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput, IndicatorError> {
        self.ensure_lookback(series)?;
        let closes = series.closes();

        let fast = window::ema_series(closes, self.fast);
        let slow = window::ema_series(closes, self.slow);
        let macd_series: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal_series = window::ema_series(&macd_series, self.signal);

        let macd_line = macd_series[macd_series.len() - 1];
        let signal_line = signal_series[signal_series.len() - 1];
        let histogram = macd_line - signal_line;

        IndicatorOutput::new(macd_line)
            .with("macd_line", macd_line)
            .with("signal_line", signal_line)
            .with("histogram", histogram)
            .ensure_finite(self.slow, series.len())
    }
}
