//! Candle source port trait.

use crate::domain::candle::Candle;
use crate::domain::error::CandlesimError;

/// Fewest candles a source returns when enough exist.
pub const MIN_BAR_COUNT: usize = 10;

pub trait CandlePort {
    /// Time-ascending candles covering the last `days` days of
    /// `unit_minutes` bars for `market`.
    fn load_candles(
        &self,
        market: &str,
        unit_minutes: u32,
        days: u32,
    ) -> Result<Vec<Candle>, CandlesimError>;
}

/// Bars in `days` days of `unit_minutes` candles, never below [`MIN_BAR_COUNT`].
pub fn expected_bar_count(days: u32, unit_minutes: u32) -> usize {
    let minutes = days as usize * 24 * 60;
    (minutes / unit_minutes.max(1) as usize).max(MIN_BAR_COUNT)
}

/// Sort ascending by time and keep the most recent `expected_bar_count` bars.
pub fn normalize_candles(mut candles: Vec<Candle>, days: u32, unit_minutes: u32) -> Vec<Candle> {
    candles.sort_by_key(|c| c.time);
    let keep = expected_bar_count(days, unit_minutes);
    if candles.len() > keep {
        candles.drain(..candles.len() - keep);
    }
    candles
}

/// `<market>_<unit>m_<days>d.<ext>`
pub fn cache_file_name(market: &str, unit_minutes: u32, days: u32, ext: &str) -> String {
    format!("{market}_{unit_minutes}m_{days}d.{ext}")
}
