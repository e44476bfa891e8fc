//! Run metrics: return, drawdown and trade counts.

use serde::Serialize;

use super::portfolio::Portfolio;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub final_value: f64,
    pub roi: f64,
    pub max_drawdown: f64,
    /// Longest run of consecutive steps spent strictly below the running peak.
    pub max_drawdown_duration: usize,
    pub trade_count: usize,
    pub sell_trade_count: usize,
}

impl Metrics {
    /// Metrics for a finished run, marking the holding at `last_close`.
    ///
    /// `initial_cash` must be positive; the simulator rejects anything else.
    pub fn compute(portfolio: &Portfolio, last_close: f64) -> Self {
        let final_value = portfolio.total_equity(last_close);
        let roi = (final_value - portfolio.initial_cash) / portfolio.initial_cash;
        let (max_drawdown, max_drawdown_duration) = compute_drawdown(&portfolio.equity_curve);

        Metrics {
            final_value,
            roi,
            max_drawdown,
            max_drawdown_duration,
            trade_count: portfolio.trades.len(),
            sell_trade_count: portfolio.sell_trade_count(),
        }
    }
}

/// Maximum fractional drop from a running peak, and the longest stretch
/// spent strictly below one. Returning to the peak ends the stretch. Peaks
/// that are not positive contribute no drawdown.
pub fn compute_drawdown(equity_curve: &[f64]) -> (f64, usize) {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;
    let mut max_dd_duration = 0usize;
    let mut current_dd_duration = 0usize;

    for &equity in equity_curve {
        if equity >= peak {
            peak = equity;
            current_dd_duration = 0;
        } else if peak > 0.0 {
            let dd = (peak - equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
            current_dd_duration += 1;
            if current_dd_duration > max_dd_duration {
                max_dd_duration = current_dd_duration;
            }
        }
    }

    (max_dd, max_dd_duration)
}

/// Sell trades per day over the simulated period; 0 for a non-positive span.
pub fn trades_per_day(sell_trade_count: usize, days: f64) -> f64 {
    if days <= 0.0 {
        return 0.0;
    }
    sell_trade_count as f64 / days
}
