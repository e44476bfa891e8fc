//! Strategy parameters.
//!
//! A run is a pure function of (candles, `StrategyParams`). The defaults
//! are tuned for 1-minute KRW-BTC candles; [`StrategyParams::for_timeframe`]
//! rescales the cooldowns, which are counted in bars, for other candle units.

use serde::{Deserialize, Serialize};

/// Cooldowns in bars of the 1-minute timeframe (15 h, 30 h and 120 h).
pub const REENTRY_COOLDOWN_ONE_MINUTE_BARS: u32 = 15 * 60;
pub const STOP_LOSS_COOLDOWN_ONE_MINUTE_BARS: u32 = 30 * 60;
pub const PARTIAL_TAKE_PROFIT_COOLDOWN_ONE_MINUTE_BARS: u32 = 120 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    // Account and order sizing
    pub initial_cash: f64,
    pub max_order_krw: f64,
    pub min_order_krw: f64,
    pub trade_cost_rate: f64,

    // Trend
    pub ma_short: usize,
    pub ma_long: usize,
    pub ma_long_slope_lookback: usize,
    pub ma_long_slope_min: f64,
    pub max_extension_pct: f64,

    // Momentum
    pub rsi_period: usize,
    pub rsi_buy_threshold: f64,
    pub rsi_sell_threshold: f64,
    pub rsi_overbought: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,

    // Strength and participation
    pub adx_period: usize,
    pub min_adx: f64,
    pub volume_lookback: usize,
    pub min_volume_ratio: f64,

    // Bands and breakout
    pub boll_window: usize,
    pub boll_stddev: f64,
    pub boll_min_bandwidth_pct: f64,
    pub boll_max_percent_b: f64,
    pub breakout_lookback: usize,
    pub breakout_pct: f64,
    pub min_confirmations: usize,

    // Exits
    pub trailing_window: usize,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    pub trailing_stop_pct: f64,
    pub partial_take_profit_pct: f64,
    pub stop_exit_pct: f64,
    pub trend_exit_pct: f64,
    pub momentum_exit_pct: f64,

    // Cooldowns, in steps
    pub reentry_cooldown: usize,
    pub stop_loss_cooldown: usize,
    pub partial_take_profit_cooldown: usize,

    // Volatility targeting
    pub volatility_window: usize,
    pub target_vol_pct: f64,
}

impl StrategyParams {
    /// Defaults with cooldowns converted to bars of `unit_minutes` each.
    pub fn for_timeframe(unit_minutes: u32) -> Self {
        let unit = unit_minutes.max(1);
        StrategyParams {
            reentry_cooldown: (REENTRY_COOLDOWN_ONE_MINUTE_BARS / unit) as usize,
            stop_loss_cooldown: (STOP_LOSS_COOLDOWN_ONE_MINUTE_BARS / unit) as usize,
            partial_take_profit_cooldown: (PARTIAL_TAKE_PROFIT_COOLDOWN_ONE_MINUTE_BARS / unit)
                as usize,
            ..Self::base()
        }
    }

    /// True when the partial take-profit fraction lies strictly inside (0, 100).
    pub fn partial_take_profit_enabled(&self) -> bool {
        self.partial_take_profit_pct > 0.0 && self.partial_take_profit_pct < 100.0
    }

    fn base() -> Self {
        StrategyParams {
            initial_cash: 1_000_000.0,
            max_order_krw: 10_000.0,
            min_order_krw: 5_000.0,
            trade_cost_rate: 0.0015,
            ma_short: 20,
            ma_long: 100,
            ma_long_slope_lookback: 5,
            ma_long_slope_min: 0.05,
            max_extension_pct: 1.2,
            rsi_period: 14,
            rsi_buy_threshold: 55.0,
            rsi_sell_threshold: 45.0,
            rsi_overbought: 70.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            adx_period: 14,
            min_adx: 18.0,
            volume_lookback: 20,
            min_volume_ratio: 0.8,
            boll_window: 20,
            boll_stddev: 2.0,
            boll_min_bandwidth_pct: 0.6,
            boll_max_percent_b: 1.05,
            breakout_lookback: 20,
            breakout_pct: 0.3,
            min_confirmations: 2,
            trailing_window: 20,
            stop_loss_pct: 2.2,
            take_profit_pct: 4.5,
            trailing_stop_pct: 2.3,
            partial_take_profit_pct: 40.0,
            stop_exit_pct: 100.0,
            trend_exit_pct: 0.0,
            momentum_exit_pct: 0.0,
            reentry_cooldown: 0,
            stop_loss_cooldown: 0,
            partial_take_profit_cooldown: 0,
            volatility_window: 30,
            target_vol_pct: 0.5,
        }
    }
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self::for_timeframe(1)
    }
}
