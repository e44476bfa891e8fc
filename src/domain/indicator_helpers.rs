//! Growing price history and per-step snapshot assembly.
//!
//! Each indicator sees only the trailing slice it needs, so a step costs
//! roughly the same no matter how long the run is.

use crate::domain::candle::Candle;
use crate::domain::indicator::{
    average_directional_index, bollinger, breakout_level, ma_slope_pct, macd_histogram,
    moving_average, relative_strength_index, volatility_pct, volume_ratio, window_trailing_high,
    IndicatorSnapshot,
};
use crate::domain::strategy::StrategyParams;

/// Append-only series of the candle fields the indicators read.
#[derive(Debug, Clone, Default)]
pub struct PriceHistory {
    pub closes: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub quote_volumes: Vec<f64>,
}

impl PriceHistory {
    pub fn push(&mut self, candle: &Candle) {
        self.closes.push(candle.close);
        self.highs.push(candle.high);
        self.lows.push(candle.low);
        self.quote_volumes.push(candle.quote_volume);
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }
}

/// Last `n` items, or the whole slice when shorter.
fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

/// Evaluate every indicator against the history up to and including the
/// latest candle, using its close as the current price.
pub fn compute_snapshot(history: &PriceHistory, params: &StrategyParams) -> IndicatorSnapshot {
    let Some(price) = history.last_close() else {
        return IndicatorSnapshot::default();
    };
    let closes = &history.closes;
    let highs = &history.highs;

    let adx_window = params.adx_period * 2 + 1;
    let volatility = if params.target_vol_pct > 0.0 {
        volatility_pct(
            tail(closes, params.volatility_window + 1),
            params.volatility_window,
        )
    } else {
        None
    };

    IndicatorSnapshot {
        ma_short: moving_average(closes, params.ma_short),
        ma_long: moving_average(closes, params.ma_long),
        rsi: relative_strength_index(tail(closes, params.rsi_period + 1), params.rsi_period),
        macd_histogram: macd_histogram(
            tail(closes, params.macd_slow + params.macd_signal + 1),
            params.macd_fast,
            params.macd_slow,
            params.macd_signal,
        ),
        adx: average_directional_index(
            tail(highs, adx_window),
            tail(&history.lows, adx_window),
            tail(closes, adx_window),
            params.adx_period,
        ),
        volume_ratio: volume_ratio(
            tail(&history.quote_volumes, params.volume_lookback + 1),
            params.volume_lookback,
        ),
        breakout_level: breakout_level(highs, params.breakout_lookback, params.breakout_pct),
        ma_long_slope_pct: ma_slope_pct(closes, params.ma_long, params.ma_long_slope_lookback),
        volatility_pct: volatility,
        bollinger: bollinger(
            tail(closes, params.boll_window),
            params.boll_window,
            params.boll_stddev,
            price,
        ),
        window_trailing_high: window_trailing_high(highs, params.trailing_window),
    }
}
