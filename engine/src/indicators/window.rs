// Index-bounded window helpers shared by the calculators.
// Callers check lookback before slicing; these functions assume non-empty input.

/// The last `n` values of `values`.
pub fn last(values: &[f64], n: usize) -> &[f64] {
    &values[values.len() - n..]
}

/// Arithmetic mean, accumulated as offsets from the first value so a flat
/// window returns that value exactly.
pub fn mean(values: &[f64]) -> f64 {
    let first = values[0];
    first + values.iter().map(|v| v - first).sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`), two-pass around the mean.
pub fn population_std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

pub fn highest(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

pub fn lowest(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Exponentially weighted running average over the whole of `values`, seeded
/// with the first value. Element `i` is the average after observing `values[..=i]`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    if let Some(&seed) = iter.next() {
        let mut prev = seed;
        out.push(prev);
        for &value in iter {
            // alpha*value + (1-alpha)*prev, written so a flat input stays exactly flat
            prev += alpha * (value - prev);
            out.push(prev);
        }
    }
    out
}
