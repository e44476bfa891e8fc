//! Decision data structures and the ordered exit-rule table.
//!
//! - `TradeReason`: why a trade happened, serialized in snake case
//! - `Side`: BUY or SELL
//! - `ExitSignal`: a matched exit rule and the percentage it sells
//! - `Decision`: what the engine wants to do at a step
//! - `EXIT_RULES`: exit predicates in priority order, first match wins

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::indicator::{percent_factor, IndicatorSnapshot};
use crate::domain::strategy::StrategyParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeReason {
    Entry,
    StopLoss,
    TrailingStop,
    MomentumReversal,
    TakeProfitPartial,
    TakeProfit,
    TrendBreak,
}

impl TradeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeReason::Entry => "entry",
            TradeReason::StopLoss => "stop_loss",
            TradeReason::TrailingStop => "trailing_stop",
            TradeReason::MomentumReversal => "momentum_reversal",
            TradeReason::TakeProfitPartial => "take_profit_partial",
            TradeReason::TakeProfit => "take_profit",
            TradeReason::TrendBreak => "trend_break",
        }
    }

    /// Exits that start the stop-loss cooldown.
    pub fn is_protective(&self) -> bool {
        matches!(
            self,
            TradeReason::StopLoss | TradeReason::TrailingStop | TradeReason::MomentumReversal
        )
    }
}

impl fmt::Display for TradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitSignal {
    pub reason: TradeReason,
    /// Percentage of the holding to sell; `<= 0` means hold.
    pub sell_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Hold,
    Enter { funds: f64 },
    Exit(ExitSignal),
}

/// Everything the exit predicates read at one step while long.
#[derive(Debug, Clone, Copy)]
pub struct ExitContext<'a> {
    pub step: usize,
    pub price: f64,
    pub average_entry_price: f64,
    pub trailing_high: f64,
    pub last_partial_take_step: Option<usize>,
    pub snapshot: &'a IndicatorSnapshot,
    pub params: &'a StrategyParams,
}

impl ExitContext<'_> {
    pub fn stop_loss_threshold(&self) -> f64 {
        self.average_entry_price * percent_factor(-self.params.stop_loss_pct)
    }

    pub fn take_profit_threshold(&self) -> f64 {
        self.average_entry_price * percent_factor(self.params.take_profit_pct)
    }

    pub fn trailing_stop_threshold(&self) -> f64 {
        self.trailing_high * percent_factor(-self.params.trailing_stop_pct)
    }

    /// A partial take is allowed when enabled and the cooldown since the
    /// previous one has elapsed.
    pub fn can_partial(&self) -> bool {
        if !self.params.partial_take_profit_enabled() {
            return false;
        }
        match self.last_partial_take_step {
            None => true,
            Some(last) => {
                self.step.saturating_sub(last) >= self.params.partial_take_profit_cooldown
            }
        }
    }
}

pub struct ExitRule {
    pub name: &'static str,
    pub triggered: fn(&ExitContext) -> bool,
    pub action: fn(&ExitContext) -> ExitSignal,
}

pub const EXIT_RULES: [ExitRule; 5] = [
    ExitRule {
        name: "stop_loss",
        triggered: stop_loss_hit,
        action: stop_loss_exit,
    },
    ExitRule {
        name: "trailing_stop",
        triggered: trailing_stop_hit,
        action: trailing_stop_exit,
    },
    ExitRule {
        name: "momentum_reversal",
        triggered: momentum_reversed,
        action: momentum_exit,
    },
    ExitRule {
        name: "take_profit",
        triggered: take_profit_hit,
        action: take_profit_exit,
    },
    ExitRule {
        name: "trend_break",
        triggered: trend_broken,
        action: trend_exit,
    },
];

fn stop_loss_hit(ctx: &ExitContext) -> bool {
    ctx.price <= ctx.stop_loss_threshold()
}

fn stop_loss_exit(ctx: &ExitContext) -> ExitSignal {
    ExitSignal {
        reason: TradeReason::StopLoss,
        sell_pct: ctx.params.stop_exit_pct,
    }
}

fn trailing_stop_hit(ctx: &ExitContext) -> bool {
    ctx.price <= ctx.trailing_stop_threshold()
}

fn trailing_stop_exit(ctx: &ExitContext) -> ExitSignal {
    ExitSignal {
        reason: TradeReason::TrailingStop,
        sell_pct: ctx.params.stop_exit_pct,
    }
}

fn momentum_reversed(ctx: &ExitContext) -> bool {
    match (ctx.snapshot.macd_histogram, ctx.snapshot.rsi) {
        (Some(hist), Some(rsi)) => hist < 0.0 && rsi < ctx.params.rsi_sell_threshold,
        _ => false,
    }
}

fn momentum_exit(ctx: &ExitContext) -> ExitSignal {
    ExitSignal {
        reason: TradeReason::MomentumReversal,
        sell_pct: ctx.params.momentum_exit_pct,
    }
}

fn take_profit_hit(ctx: &ExitContext) -> bool {
    ctx.price >= ctx.take_profit_threshold()
}

fn take_profit_exit(ctx: &ExitContext) -> ExitSignal {
    if ctx.can_partial() {
        ExitSignal {
            reason: TradeReason::TakeProfitPartial,
            sell_pct: ctx.params.partial_take_profit_pct,
        }
    } else {
        ExitSignal {
            reason: TradeReason::TakeProfit,
            sell_pct: 100.0,
        }
    }
}

fn trend_broken(ctx: &ExitContext) -> bool {
    ctx.snapshot.ma_long.is_some_and(|ma| ctx.price < ma)
}

fn trend_exit(ctx: &ExitContext) -> ExitSignal {
    ExitSignal {
        reason: TradeReason::TrendBreak,
        sell_pct: ctx.params.trend_exit_pct,
    }
}
