//! Cash, the single position, the trade log and the equity curve.

use serde::Serialize;

use super::position::PositionState;
use super::rule::{Side, TradeReason};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    /// 0-based candle index the trade executed on.
    pub step: usize,
    pub side: Side,
    pub price: f64,
    pub quantity: f64,
    pub reason: TradeReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub cash: f64,
    pub initial_cash: f64,
    pub position: PositionState,
    pub trades: Vec<TradeRecord>,
    pub equity_curve: Vec<f64>,
}

impl Portfolio {
    pub fn new(initial_cash: f64) -> Self {
        Portfolio {
            cash: initial_cash,
            initial_cash,
            position: PositionState::default(),
            trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    pub fn total_equity(&self, price: f64) -> f64 {
        self.cash + self.position.market_value(price)
    }

    /// Append the mark-to-market value at `price` and return it.
    pub fn record_equity(&mut self, price: f64) -> f64 {
        let equity = self.total_equity(price);
        self.equity_curve.push(equity);
        equity
    }

    pub fn record_trade(&mut self, trade: TradeRecord) {
        self.trades.push(trade);
    }

    pub fn sell_trade_count(&self) -> usize {
        self.trades.iter().filter(|t| t.side == Side::Sell).count()
    }
}
