//! Simulation driver.
//!
//! Walks candles oldest to newest. Every step:
//! 1. append the candle to the price history and compute the snapshot
//! 2. record equity `cash + quantity × close`
//! 3. LONG: refresh the trailing high and evaluate exits (never entry)
//! 4. FLAT: evaluate entry
//!
//! [`Simulator`] exposes the loop one candle at a time; [`run`] drives a
//! whole sequence.

use serde::Serialize;
use tracing::{debug, info};

use super::candle::Candle;
use super::error::CandlesimError;
use super::execution::{execute_buy, execute_sell};
use super::indicator_helpers::{compute_snapshot, PriceHistory};
use super::metrics::Metrics;
use super::portfolio::{Portfolio, TradeRecord};
use super::position::PositionState;
use super::rule::{Decision, ExitContext};
use super::rule_eval::{decide_exit, evaluate_entry};
use super::strategy::StrategyParams;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub equity_curve: Vec<f64>,
    pub trades: Vec<TradeRecord>,
    pub roi: f64,
    pub max_drawdown: f64,
    pub max_drawdown_duration: usize,
    pub trade_count: usize,
    pub sell_trade_count: usize,
    pub final_value: f64,
}

#[derive(Debug, Clone)]
pub struct Simulator {
    params: StrategyParams,
    history: PriceHistory,
    portfolio: Portfolio,
}

impl Simulator {
    pub fn new(params: StrategyParams) -> Result<Self, CandlesimError> {
        if params.initial_cash.is_nan() || params.initial_cash <= 0.0 {
            return Err(CandlesimError::invalid_config(
                "initial_cash",
                format!("must be positive, got {}", params.initial_cash),
            ));
        }
        Ok(Simulator {
            portfolio: Portfolio::new(params.initial_cash),
            history: PriceHistory::default(),
            params,
        })
    }

    /// Process one candle. Returns the trade executed on it, if any.
    pub fn step(&mut self, candle: &Candle) -> Option<TradeRecord> {
        let step = self.history.len();
        self.history.push(candle);
        let snapshot = compute_snapshot(&self.history, &self.params);
        let price = candle.close;

        self.portfolio.record_equity(price);

        let trade = if self.portfolio.position.is_long() {
            let position = &mut self.portfolio.position;
            let trailing_high = position.refresh_trailing_high(price, snapshot.window_trailing_high);
            let ctx = ExitContext {
                step,
                price,
                average_entry_price: position.average_entry_price,
                trailing_high,
                last_partial_take_step: position.last_partial_take_step,
                snapshot: &snapshot,
                params: &self.params,
            };
            match decide_exit(&ctx) {
                Decision::Exit(signal) => execute_sell(
                    &mut self.portfolio,
                    step,
                    price,
                    signal,
                    self.params.trade_cost_rate,
                ),
                _ => None,
            }
        } else {
            let decision = evaluate_entry(
                step,
                price,
                &snapshot,
                &self.portfolio.position,
                self.portfolio.cash,
                &self.params,
            );
            match decision {
                Decision::Enter { funds } => execute_buy(&mut self.portfolio, step, price, funds),
                _ => None,
            }
        };

        if let Some(t) = &trade {
            debug!(
                step = t.step,
                side = ?t.side,
                price = t.price,
                quantity = t.quantity,
                reason = %t.reason,
                cash = self.portfolio.cash,
                "trade executed"
            );
        }
        trade
    }

    pub fn position(&self) -> &PositionState {
        &self.portfolio.position
    }

    pub fn cash(&self) -> f64 {
        self.portfolio.cash
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn steps(&self) -> usize {
        self.history.len()
    }

    pub fn finish(self) -> Result<SimulationResult, CandlesimError> {
        let last_close = self.history.last_close().ok_or_else(|| CandlesimError::InvalidInput {
            reason: "candle sequence is empty".to_string(),
        })?;
        let metrics = Metrics::compute(&self.portfolio, last_close);

        info!(
            steps = self.history.len(),
            trades = metrics.trade_count,
            sells = metrics.sell_trade_count,
            roi = metrics.roi,
            max_drawdown = metrics.max_drawdown,
            final_value = metrics.final_value,
            "simulation finished"
        );

        Ok(SimulationResult {
            equity_curve: self.portfolio.equity_curve,
            trades: self.portfolio.trades,
            roi: metrics.roi,
            max_drawdown: metrics.max_drawdown,
            max_drawdown_duration: metrics.max_drawdown_duration,
            trade_count: metrics.trade_count,
            sell_trade_count: metrics.sell_trade_count,
            final_value: metrics.final_value,
        })
    }
}

/// Simulate `candles` under `params` in one pass.
pub fn run(candles: &[Candle], params: &StrategyParams) -> Result<SimulationResult, CandlesimError> {
    if candles.is_empty() {
        return Err(CandlesimError::InvalidInput {
            reason: "candle sequence is empty".to_string(),
        });
    }
    let mut sim = Simulator::new(params.clone())?;
    for candle in candles {
        sim.step(candle);
    }
    sim.finish()
}
