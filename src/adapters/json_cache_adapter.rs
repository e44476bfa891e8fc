//! JSON candle cache adapter.
//!
//! Reads `<dir>/<market>_<unit>m_<days>d.json`: an array of
//! `{time, open, high, low, close, quote}` objects.

use std::fs;
use std::path::PathBuf;

use crate::adapters::candle_record::CandleRecord;
use crate::domain::candle::Candle;
use crate::domain::error::CandlesimError;
use crate::ports::data_port::{cache_file_name, normalize_candles, CandlePort};

pub struct JsonCacheAdapter {
    base_path: PathBuf,
}

impl JsonCacheAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn cache_path(&self, market: &str, unit_minutes: u32, days: u32) -> PathBuf {
        self.base_path
            .join(cache_file_name(market, unit_minutes, days, "json"))
    }

    /// Write `candles` in the cache layout, creating the directory if needed.
    pub fn save_candles(
        &self,
        market: &str,
        unit_minutes: u32,
        days: u32,
        candles: &[Candle],
    ) -> Result<PathBuf, CandlesimError> {
        fs::create_dir_all(&self.base_path)?;
        let records: Vec<CandleRecord> = candles.iter().map(CandleRecord::from).collect();
        let path = self.cache_path(market, unit_minutes, days);
        fs::write(&path, serde_json::to_string(&records)?)?;
        Ok(path)
    }
}

impl CandlePort for JsonCacheAdapter {
    fn load_candles(
        &self,
        market: &str,
        unit_minutes: u32,
        days: u32,
    ) -> Result<Vec<Candle>, CandlesimError> {
        let path = self.cache_path(market, unit_minutes, days);
        let content = fs::read_to_string(&path).map_err(|e| CandlesimError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let records: Vec<CandleRecord> =
            serde_json::from_str(&content).map_err(|e| CandlesimError::Data {
                reason: format!("invalid candle cache {}: {}", path.display(), e),
            })?;

        let candles = records
            .into_iter()
            .enumerate()
            .map(|(row, r)| r.into_candle(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(normalize_candles(candles, days, unit_minutes))
    }
}
