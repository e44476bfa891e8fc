//! Exponential Moving Average series.
//!
//! k = 2/(n+1), seeded with the first value of the slice,
//! then EMA[i] = V[i]*k + EMA[i-1]*(1-k).
//! No warmup: the series has one value per input value.

pub fn exponential_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.is_empty() {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut series = Vec::with_capacity(values.len());
    let mut prev = values[0];
    series.push(prev);

    for &value in &values[1..] {
        prev = value * k + prev * (1.0 - k);
        series.push(prev);
    }

    series
}
