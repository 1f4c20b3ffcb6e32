// Turns raw bars from a loader into the ordered history a PriceSeries expects.
use shared::models::PriceBar;

/// Sorts bars by date, drops repeated dates (the first occurrence in input
/// order wins) and keeps only the most recent `max_bars`.
pub fn prepare_history(mut bars: Vec<PriceBar>, max_bars: usize) -> Vec<PriceBar> {
    let loaded = bars.len();

    // stable sort keeps input order among equal dates, so dedup keeps the first
    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);
    let duplicates = loaded - bars.len();

    if bars.len() > max_bars {
        bars.drain(..bars.len() - max_bars);
    }

    if duplicates > 0 {
        tracing::warn!(duplicates, "Dropped bars with repeated dates");
    }
    tracing::debug!(loaded, kept = bars.len(), max_bars, "Prepared price history");
    bars
}
