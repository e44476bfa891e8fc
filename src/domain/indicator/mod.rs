//! Technical indicator implementations.
//!
//! Every indicator is a pure function over a trailing slice of history and
//! returns `None` when the slice is too short or a denominator is not
//! positive. Callers treat `None` as "cannot evaluate", never as zero.
//!
//! - `IndicatorSnapshot`: every indicator the decision rules read at a step
//! - `BollingerBands`: envelope plus the two derived ratios

pub mod adx;
pub mod bollinger;
pub mod breakout;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod volume;

pub use adx::average_directional_index;
pub use bollinger::bollinger;
pub use breakout::{breakout_level, highest_high, window_trailing_high};
pub use ema::exponential_series;
pub use macd::macd_histogram;
pub use rsi::relative_strength_index;
pub use sma::{ma_slope_pct, moving_average};
pub use stddev::{population_stddev, volatility_pct};
pub use volume::volume_ratio;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
    /// Band width as a percentage of the middle line; `None` if middle <= 0.
    pub bandwidth_pct: Option<f64>,
    /// Position of the price inside the band; `None` if the band is flat.
    pub percent_b: Option<f64>,
}

/// Indicator values for one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndicatorSnapshot {
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub adx: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub breakout_level: Option<f64>,
    pub ma_long_slope_pct: Option<f64>,
    pub volatility_pct: Option<f64>,
    pub bollinger: Option<BollingerBands>,
    pub window_trailing_high: Option<f64>,
}

/// 1 + pct/100
pub fn percent_factor(pct: f64) -> f64 {
    1.0 + pct / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_all_undefined() {
        let snap = IndicatorSnapshot::default();
        assert!(snap.ma_short.is_none());
        assert!(snap.ma_long.is_none());
        assert!(snap.rsi.is_none());
        assert!(snap.macd_histogram.is_none());
        assert!(snap.adx.is_none());
        assert!(snap.volume_ratio.is_none());
        assert!(snap.breakout_level.is_none());
        assert!(snap.ma_long_slope_pct.is_none());
        assert!(snap.volatility_pct.is_none());
        assert!(snap.bollinger.is_none());
        assert!(snap.window_trailing_high.is_none());
    }

    #[test]
    fn percent_factor_signs() {
        assert!((percent_factor(2.5) - 1.025).abs() < 1e-12);
        assert!((percent_factor(-2.5) - 0.975).abs() < 1e-12);
        assert!((percent_factor(0.0) - 1.0).abs() < f64::EPSILON);
    }
}
