// Series builders for calculator unit tests.
use chrono::{Duration, TimeZone, Utc};
use shared::models::PriceBar;

use crate::models::PriceSeries;

fn day(i: usize) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(i as i64)
}

/// Bars whose open/high/low all equal the close.
pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceBar::new(day(i), c, c, c, c, None))
        .collect();
    PriceSeries::new(bars).unwrap()
}

/// Bars from (high, low, close) triples; open is set to the close.
pub fn series_from_hlc(bars: &[(f64, f64, f64)]) -> PriceSeries {
    let bars = bars
        .iter()
        .enumerate()
        .map(|(i, &(h, l, c))| PriceBar::new(day(i), c, h, l, c, None))
        .collect();
    PriceSeries::new(bars).unwrap()
}
