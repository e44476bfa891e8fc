//! MACD (Moving Average Convergence Divergence) histogram.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line, taken at the last bar
//!
//! All EMAs are seeded with the first value of the slice.
//! Warmup: needs slow + signal closes.

use crate::domain::indicator::exponential_series;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn macd_histogram(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Option<f64> {
    if fast == 0 || slow == 0 || signal == 0 || closes.len() < slow + signal {
        return None;
    }

    let ema_fast = exponential_series(closes, fast);
    let ema_slow = exponential_series(closes, slow);
    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = exponential_series(&macd_line, signal);
    let macd = macd_line.last()?;
    let sig = signal_line.last()?;
    Some(macd - sig)
}
