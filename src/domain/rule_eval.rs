//! Decision engine.
//!
//! # Evaluation Semantics
//!
//! - Exit (LONG only): walk `EXIT_RULES` in order; the first rule whose
//!   predicate holds decides. A matched rule selling `<= 0` percent holds.
//! - Entry (FLAT only): every filter is a veto; missing indicators veto
//!   whenever the filter that needs them is enabled.
//! - Sizing: min(cash, max order), scaled down toward the volatility
//!   target, net of costs; below the minimum order size no entry happens.

use crate::domain::indicator::{percent_factor, IndicatorSnapshot};
use crate::domain::position::PositionState;
use crate::domain::rule::{Decision, ExitContext, ExitSignal, EXIT_RULES};
use crate::domain::strategy::StrategyParams;

/// The first exit rule that fires, regardless of its sell percentage.
pub fn evaluate_exit(ctx: &ExitContext) -> Option<ExitSignal> {
    EXIT_RULES
        .iter()
        .find(|rule| (rule.triggered)(ctx))
        .map(|rule| (rule.action)(ctx))
}

pub fn decide_exit(ctx: &ExitContext) -> Decision {
    match evaluate_exit(ctx) {
        Some(signal) if signal.sell_pct > 0.0 => Decision::Exit(signal),
        _ => Decision::Hold,
    }
}

pub fn evaluate_entry(
    step: usize,
    price: f64,
    snapshot: &IndicatorSnapshot,
    position: &PositionState,
    cash: f64,
    params: &StrategyParams,
) -> Decision {
    if !position.is_flat()
        || !passes_filters(price, snapshot, params)
        || count_confirmations(price, snapshot, params) < params.min_confirmations
        || in_cooldown(step, position, params)
    {
        return Decision::Hold;
    }
    match order_funds(cash, snapshot.volatility_pct, params) {
        Some(funds) => Decision::Enter { funds },
        None => Decision::Hold,
    }
}

/// Trend, extension, strength, participation and band vetoes.
pub fn passes_filters(price: f64, snapshot: &IndicatorSnapshot, params: &StrategyParams) -> bool {
    if price <= 0.0 {
        return false;
    }
    let (Some(ma_short), Some(ma_long)) = (snapshot.ma_short, snapshot.ma_long) else {
        return false;
    };
    if ma_short <= ma_long || price <= ma_long {
        return false;
    }

    match snapshot.ma_long_slope_pct {
        None if params.ma_long_slope_min > 0.0 => return false,
        Some(slope) if slope < params.ma_long_slope_min => return false,
        _ => {}
    }

    if params.max_extension_pct > 0.0 && price > ma_long * percent_factor(params.max_extension_pct)
    {
        return false;
    }
    if params.min_adx > 0.0 && !at_least(snapshot.adx, params.min_adx) {
        return false;
    }
    if params.min_volume_ratio > 0.0 && !at_least(snapshot.volume_ratio, params.min_volume_ratio) {
        return false;
    }

    if params.boll_window > 1 {
        if params.boll_min_bandwidth_pct > 0.0 {
            let bandwidth = snapshot.bollinger.and_then(|b| b.bandwidth_pct);
            if !at_least(bandwidth, params.boll_min_bandwidth_pct) {
                return false;
            }
        }
        if params.boll_max_percent_b > 0.0 {
            let percent_b = snapshot.bollinger.and_then(|b| b.percent_b);
            if !percent_b.is_some_and(|pb| pb <= params.boll_max_percent_b) {
                return false;
            }
        }
    }
    true
}

fn at_least(value: Option<f64>, floor: f64) -> bool {
    value.is_some_and(|v| v >= floor)
}

/// Number of momentum confirmations among RSI, MACD and breakout.
pub fn count_confirmations(price: f64, snapshot: &IndicatorSnapshot, params: &StrategyParams) -> usize {
    let rsi_ok = snapshot.rsi.is_some_and(|rsi| {
        rsi >= params.rsi_buy_threshold
            && (params.rsi_overbought <= 0.0 || rsi <= params.rsi_overbought)
    });
    let macd_ok = snapshot.macd_histogram.is_some_and(|h| h > 0.0);
    let breakout_ok = snapshot.breakout_level.is_some_and(|level| price > level);
    [rsi_ok, macd_ok, breakout_ok].into_iter().filter(|ok| *ok).count()
}

fn in_cooldown(step: usize, position: &PositionState, params: &StrategyParams) -> bool {
    let since_exit = PositionState::steps_since(position.last_exit_step, step);
    let since_stop = PositionState::steps_since(position.last_stop_loss_step, step);
    since_exit.is_some_and(|n| n < params.reentry_cooldown)
        || since_stop.is_some_and(|n| n < params.stop_loss_cooldown)
}

/// Net funds to spend on an entry, or `None` below the minimum order size.
pub fn order_funds(cash: f64, volatility_pct: Option<f64>, params: &StrategyParams) -> Option<f64> {
    let mut funds = cash.min(params.max_order_krw);
    if params.target_vol_pct > 0.0 {
        if let Some(vol) = volatility_pct.filter(|v| *v > 0.0) {
            funds *= (params.target_vol_pct / vol).min(1.0);
        }
    }
    funds *= 1.0 - params.trade_cost_rate;
    (funds >= params.min_order_krw).then_some(funds)
}
