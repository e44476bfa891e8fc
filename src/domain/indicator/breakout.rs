//! Highest-high windows: breakout level and trailing high.

use crate::domain::indicator::percent_factor;

/// Highest high over a `window`-wide slice ending at the last bar, or at
/// the bar before it when `exclude_last` is set.
///
/// Requires at least `window` highs. When the current bar is excluded and
/// exactly `window` highs exist, the slice holds the `window - 1` prior bars.
pub fn highest_high(highs: &[f64], window: usize, exclude_last: bool) -> Option<f64> {
    if window == 0 || highs.len() < window {
        return None;
    }
    let end = if exclude_last {
        highs.len().checked_sub(2)?
    } else {
        highs.len() - 1
    };
    let start = (end + 1).saturating_sub(window);
    highs[start..=end].iter().copied().reduce(f64::max)
}

/// Prior highest high scaled by (1 + pct/100). Disabled for lookback <= 1.
pub fn breakout_level(highs: &[f64], lookback: usize, pct: f64) -> Option<f64> {
    if lookback <= 1 {
        return None;
    }
    highest_high(highs, lookback, true).map(|high| high * percent_factor(pct))
}

/// Highest high of the last `window` bars, current bar included.
pub fn window_trailing_high(highs: &[f64], window: usize) -> Option<f64> {
    if window <= 1 {
        return None;
    }
    highest_high(highs, window, false)
}
