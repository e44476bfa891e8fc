//! Standard deviation and return volatility.
//!
//! Population standard deviation (divides by N, not N-1):
//! STDDEV = sqrt(sum((x - mean)^2) / N)
//!
//! Volatility = STDDEV of one-bar simple returns over n bars, in percent.
//! Returns whose previous close is not positive are skipped.
//! Warmup: needs n+1 closes.

/// Population standard deviation of `values`; `None` when empty.
pub fn population_stddev(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}

pub fn volatility_pct(closes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || closes.len() < window + 1 {
        return None;
    }
    let returns: Vec<f64> = ((closes.len() - window)..closes.len())
        .filter_map(|i| {
            let prev = closes[i - 1];
            if prev <= 0.0 {
                None
            } else {
                Some((closes[i] - prev) / prev)
            }
        })
        .collect();

    population_stddev(&returns).map(|sd| sd * 100.0)
}
