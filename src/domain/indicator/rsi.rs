//! RSI (Relative Strength Index) over a trailing window.
//!
//! Plain means over the last n price changes, recomputed from scratch on
//! every call (no Wilder smoothing), so the result depends only on the
//! last n+1 closes:
//! - Changes >= 0 count as gains, negative changes as losses
//! - avg_gain = sum(gains)/n, avg_loss = sum(losses)/n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100; else if avg_gain == 0: RSI = 0
//!
//! Warmup: needs n+1 closes.

pub fn relative_strength_index(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in (closes.len() - period)..closes.len() {
        let change = closes[i] - closes[i - 1];
        if change >= 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Some(100.0);
    }
    if avg_gain == 0.0 {
        return Some(0.0);
    }
    Some(100.0 - (100.0 / (1.0 + avg_gain / avg_loss)))
}
