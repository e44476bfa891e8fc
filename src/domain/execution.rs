//! Trade execution against the portfolio.
//!
//! Fills happen at the step's close. Costs are a flat rate: a BUY spends
//! funds already net of cost, a SELL receives `qty × price × (1 − rate)`.

use super::portfolio::{Portfolio, TradeRecord};
use super::rule::{ExitSignal, Side, TradeReason};

/// Open a position with `funds` at `price`. Returns the trade, or `None`
/// if the portfolio is already long or the inputs cannot buy anything.
pub fn execute_buy(
    portfolio: &mut Portfolio,
    step: usize,
    price: f64,
    funds: f64,
) -> Option<TradeRecord> {
    if price <= 0.0 || funds <= 0.0 {
        return None;
    }
    let quantity = funds / price;
    if !portfolio.position.open(quantity, price) {
        return None;
    }
    portfolio.cash -= funds;

    let trade = TradeRecord {
        step,
        side: Side::Buy,
        price,
        quantity,
        reason: TradeReason::Entry,
    };
    portfolio.record_trade(trade.clone());
    Some(trade)
}

/// Sell `signal.sell_pct` percent of the holding at `price`.
///
/// Records the exit step, and the partial-take or stop-loss step when the
/// reason calls for it. Returns `None` for a non-positive percentage or
/// when flat.
pub fn execute_sell(
    portfolio: &mut Portfolio,
    step: usize,
    price: f64,
    signal: ExitSignal,
    cost_rate: f64,
) -> Option<TradeRecord> {
    if signal.sell_pct <= 0.0 || !portfolio.position.is_long() {
        return None;
    }
    let fraction = (signal.sell_pct / 100.0).min(1.0);
    let sold = portfolio.position.reduce(fraction);
    portfolio.cash += sold * price * (1.0 - cost_rate);

    let position = &mut portfolio.position;
    if signal.reason == TradeReason::TakeProfitPartial {
        position.last_partial_take_step = Some(step);
    }
    if signal.reason.is_protective() {
        position.last_stop_loss_step = Some(step);
    }
    position.last_exit_step = Some(step);

    let trade = TradeRecord {
        step,
        side: Side::Sell,
        price,
        quantity: sold,
        reason: signal.reason,
    };
    portfolio.record_trade(trade.clone());
    Some(trade)
}
