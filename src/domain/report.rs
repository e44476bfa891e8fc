//! Per-timeframe summaries and the recommended timeframe.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::backtest::SimulationResult;
use super::metrics::trades_per_day;

/// Trade frequency band, in sell trades per day, preferred when ranking.
pub const PREFERRED_TRADES_PER_DAY: (f64, f64) = (0.2, 5.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeSummary {
    pub label: String,
    pub unit: u32,
    pub roi_pct: f64,
    pub max_dd_pct: f64,
    pub sell_trades: usize,
    pub trades_per_day: f64,
    pub final_value: f64,
}

impl TimeframeSummary {
    pub fn in_preferred_frequency(&self) -> bool {
        let (low, high) = PREFERRED_TRADES_PER_DAY;
        (low..=high).contains(&self.trades_per_day)
    }
}

pub fn summarize(label: &str, result: &SimulationResult, days: u32, unit: u32) -> TimeframeSummary {
    TimeframeSummary {
        label: label.to_string(),
        unit,
        roi_pct: result.roi * 100.0,
        max_dd_pct: result.max_drawdown * 100.0,
        sell_trades: result.sell_trade_count,
        trades_per_day: trades_per_day(result.sell_trade_count, days as f64),
        final_value: result.final_value,
    }
}

/// Best summary: inside the preferred frequency band first, then highest
/// ROI. On a tie the earlier summary wins.
pub fn recommend(summaries: &[TimeframeSummary]) -> Option<&TimeframeSummary> {
    summaries.iter().reduce(|best, candidate| {
        match rank(candidate, best) {
            Ordering::Greater => candidate,
            _ => best,
        }
    })
}

fn rank(a: &TimeframeSummary, b: &TimeframeSummary) -> Ordering {
    a.in_preferred_frequency()
        .cmp(&b.in_preferred_frequency())
        .then_with(|| a.roi_pct.partial_cmp(&b.roi_pct).unwrap_or(Ordering::Equal))
}

/// Label for the i-th timeframe of a comparison run.
pub fn timeframe_label(index: usize, unit: u32) -> String {
    match index {
        0 => "short".to_string(),
        1 => "mid".to_string(),
        _ => format!("tf{unit}"),
    }
}
