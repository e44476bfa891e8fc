//! Simple Moving Average and its slope.
//!
//! SMA(n) = mean of the last n values.
//! Slope = % change of SMA(n) now versus SMA(n) computed `lookback` bars earlier.

/// Arithmetic mean of the last `window` values.
pub fn moving_average(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = &values[values.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Percentage change of SMA(`window`) against its value `lookback` bars ago.
///
/// Needs `window + lookback` values. Undefined when either average is
/// missing, the earlier one is not positive, or the current one is zero.
pub fn ma_slope_pct(values: &[f64], window: usize, lookback: usize) -> Option<f64> {
    if lookback == 0 || values.len() < window + lookback {
        return None;
    }
    let current = moving_average(values, window)?;
    let previous = moving_average(&values[..values.len() - lookback], window)?;
    if previous <= 0.0 || current == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}
