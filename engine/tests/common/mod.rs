//! Shared builders for the engine integration tests.

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use engine::PriceSeries;
use shared::models::{IndicatorSpec, PriceBar};

pub fn bars_from_hlc(bars: &[(f64, f64, f64)]) -> Vec<PriceBar> {
    let start = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
    bars.iter()
        .enumerate()
        .map(|(i, &(h, l, c))| PriceBar::new(start + Duration::days(i as i64), c, h, l, c, Some(10_000)))
        .collect()
}

pub fn series_from_hlc(bars: &[(f64, f64, f64)]) -> PriceSeries {
    PriceSeries::new(bars_from_hlc(bars)).unwrap()
}

pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let bars: Vec<(f64, f64, f64)> = closes.iter().map(|&c| (c, c, c)).collect();
    series_from_hlc(&bars)
}

pub fn specs(ids: &[&str]) -> Vec<IndicatorSpec> {
    ids.iter().map(|id| IndicatorSpec::new(*id)).collect()
}
