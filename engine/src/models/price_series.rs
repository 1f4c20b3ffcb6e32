// Immutable, time-ordered bar container handed to the indicator calculators.
use chrono::{DateTime, Utc};
use shared::models::PriceBar;

use crate::error::EngineError;

/// An ordered, validated sequence of price bars.
///
/// Construction checks the ordering contract but never sorts or de-duplicates:
/// that is the job of whoever assembled the bars (see `data::market_data`).
/// The close/high/low columns are materialized once so calculators can work
/// on plain `&[f64]` windows.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
    closes: Vec<f64>,
    highs: Vec<f64>,
    lows: Vec<f64>,
}

impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, EngineError> {
        if bars.is_empty() {
            return Err(EngineError::InvalidSeries("series contains no bars".to_string()));
        }

        for (idx, bar) in bars.iter().enumerate() {
            for (field, value) in [("open", bar.open), ("high", bar.high), ("low", bar.low), ("close", bar.close)] {
                if !value.is_finite() || value <= 0.0 {
                    return Err(EngineError::InvalidSeries(format!(
                        "bar {} ({}) has non-positive or non-finite {}: {}",
                        idx, bar.date, field, value
                    )));
                }
            }
        }

        if let Some(pair) = bars.windows(2).find(|pair| pair[1].date <= pair[0].date) {
            let reason = if pair[1].date == pair[0].date { "duplicate date" } else { "dates out of order" };
            return Err(EngineError::InvalidSeries(format!(
                "{}: {} followed by {}",
                reason, pair[0].date, pair[1].date
            )));
        }

        let closes = bars.iter().map(|b| b.close).collect();
        let highs = bars.iter().map(|b| b.high).collect();
        let lows = bars.iter().map(|b| b.low).collect();

        Ok(PriceSeries { bars, closes, highs, lows })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn highs(&self) -> &[f64] {
        &self.highs
    }

    pub fn lows(&self) -> &[f64] {
        &self.lows
    }

    /// The last `n` bars, or the whole series when it is shorter than `n`.
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        &self.bars[self.bars.len().saturating_sub(n)..]
    }

    pub fn first_date(&self) -> DateTime<Utc> {
        self.bars[0].date
    }

    pub fn last_date(&self) -> DateTime<Utc> {
        self.bars[self.bars.len() - 1].date
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = EngineError;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self, Self::Error> {
        PriceSeries::new(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn bar(day: i64, close: f64) -> PriceBar {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day);
        PriceBar::new(date, close, close + 1.0, close - 0.5, close, Some(1_000))
    }

    #[test]
    fn test_columns_follow_bar_order() {
        let series = PriceSeries::new(vec![bar(0, 10.0), bar(1, 11.0), bar(2, 12.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), &[10.0, 11.0, 12.0]);
        assert_eq!(series.highs(), &[11.0, 12.0, 13.0]);
        assert_eq!(series.lows(), &[9.5, 10.5, 11.5]);
        assert_eq!(series.first_date(), bar(0, 1.0).date);
        assert_eq!(series.last_date(), bar(2, 1.0).date);
    }

    #[test]
    fn test_tail_clamps_to_series_length() {
        let series = PriceSeries::new(vec![bar(0, 10.0), bar(1, 11.0), bar(2, 12.0)]).unwrap();
        let last_two = series.tail(2);
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].close, 11.0);
        assert_eq!(series.tail(10).len(), 3);
        assert!(series.tail(0).is_empty());
    }

    #[test]
    fn test_empty_series_rejected() {
        let err = PriceSeries::new(Vec::new()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSeries(_)));
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let err = PriceSeries::new(vec![bar(0, 10.0), bar(1, 11.0), bar(1, 12.0)]).unwrap_err();
        assert!(err.to_string().contains("duplicate date"));
    }

    #[test]
    fn test_unordered_dates_rejected() {
        let err = PriceSeries::new(vec![bar(1, 10.0), bar(0, 11.0)]).unwrap_err();
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let mut bad = bar(1, 11.0);
        bad.low = 0.0;
        let err = PriceSeries::try_from(vec![bar(0, 10.0), bad]).unwrap_err();
        assert!(err.to_string().contains("low"));

        let mut nan = bar(1, 11.0);
        nan.close = f64::NAN;
        assert!(PriceSeries::new(vec![nan]).is_err());
    }
}
