//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//!
//! Derived ratios:
//! - Bandwidth% = (Upper - Lower) / Middle × 100, undefined if Middle <= 0
//! - %B = (Price - Lower) / (Upper - Lower), undefined if the band is flat
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: needs n closes; n <= 1 disables the indicator.

use crate::domain::indicator::{moving_average, population_stddev, BollingerBands};

pub fn bollinger(
    closes: &[f64],
    window: usize,
    stddev_mult: f64,
    current_price: f64,
) -> Option<BollingerBands> {
    if window <= 1 || closes.len() < window {
        return None;
    }

    let middle = moving_average(closes, window)?;
    let stdev = population_stddev(&closes[closes.len() - window..])?;
    let deviation = stdev * stddev_mult;
    let upper = middle + deviation;
    let lower = middle - deviation;
    let band = upper - lower;

    let bandwidth_pct = (middle > 0.0).then(|| band / middle * 100.0);
    let percent_b = (band > 0.0).then(|| (current_price - lower) / band);

    Some(BollingerBands {
        middle,
        upper,
        lower,
        bandwidth_pct,
        percent_b,
    })
}
