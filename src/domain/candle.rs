//! Candle (price bar) representation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the candle cache files (UTC, no offset).
pub const CANDLE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Traded value in quote currency over the bar.
    pub quote_volume: f64,
}

/// max(high - low, |high - prev_close|, |low - prev_close|)
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candle() -> Candle {
        Candle {
            time: NaiveDateTime::parse_from_str("2024-01-15T09:00:00", CANDLE_TIME_FORMAT)
                .unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            quote_volume: 50_000.0,
        }
    }

    #[test]
    fn true_range_hl_dominates() {
        let candle = sample_candle();
        // high-low=20, |high-100|=10, |low-100|=10 → 20
        assert!((true_range(candle.high, candle.low, 100.0) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        let candle = sample_candle();
        // high-low=20, |110-70|=40, |90-70|=20 → 40
        assert!((true_range(candle.high, candle.low, 70.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_down() {
        let candle = sample_candle();
        // high-low=20, |110-130|=20, |90-130|=40 → 40
        assert!((true_range(candle.high, candle.low, 130.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn time_format_round_trips() {
        let candle = sample_candle();
        assert_eq!(
            candle.time.format(CANDLE_TIME_FORMAT).to_string(),
            "2024-01-15T09:00:00"
        );
    }
}
