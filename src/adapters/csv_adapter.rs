//! CSV candle file adapter.
//!
//! Reads `<dir>/<market>_<unit>m_<days>d.csv` with the header
//! `time,open,high,low,close,quote`.

use std::path::PathBuf;

use crate::adapters::candle_record::CandleRecord;
use crate::domain::candle::Candle;
use crate::domain::error::CandlesimError;
use crate::ports::data_port::{cache_file_name, normalize_candles, CandlePort};

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, market: &str, unit_minutes: u32, days: u32) -> PathBuf {
        self.base_path
            .join(cache_file_name(market, unit_minutes, days, "csv"))
    }
}

impl CandlePort for CsvAdapter {
    fn load_candles(
        &self,
        market: &str,
        unit_minutes: u32,
        days: u32,
    ) -> Result<Vec<Candle>, CandlesimError> {
        let path = self.csv_path(market, unit_minutes, days);
        let mut rdr = csv::Reader::from_path(&path).map_err(|e| CandlesimError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut candles = Vec::new();
        for (row, result) in rdr.deserialize::<CandleRecord>().enumerate() {
            let record = result.map_err(|e| CandlesimError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;
            candles.push(record.into_candle(row)?);
        }

        Ok(normalize_candles(candles, days, unit_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "time,open,high,low,close,quote\n\
            2024-01-15T09:02:00,110.0,120.0,105.0,115.0,55000\n\
            2024-01-15T09:00:00,100.0,110.0,90.0,105.0,50000\n\
            2024-01-15T09:01:00,105.0,115.0,100.0,110.0,60000\n";

        fs::write(path.join("KRW-BTC_1m_30d.csv"), csv_content).unwrap();
        fs::write(
            path.join("KRW-ETH_1m_30d.csv"),
            "time,open,high,low,close,quote\n2024-01-15T09:00:00,1.0,1.0,1.0,,1.0\n",
        )
        .unwrap();

        (dir, path)
    }

    #[test]
    fn load_candles_returns_sorted_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let candles = adapter.load_candles("KRW-BTC", 1, 30).unwrap();

        assert_eq!(candles.len(), 3);
        assert_eq!(candles[0].open, 100.0);
        assert_eq!(candles[0].high, 110.0);
        assert_eq!(candles[0].low, 90.0);
        assert_eq!(candles[0].close, 105.0);
        assert_eq!(candles[0].quote_volume, 50000.0);
        assert_eq!(candles[2].close, 115.0);
    }

    #[test]
    fn load_candles_errors_for_missing_file() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let result = adapter.load_candles("KRW-XRP", 1, 30);

        assert!(matches!(result, Err(CandlesimError::Data { .. })));
    }

    #[test]
    fn load_candles_rejects_empty_cell() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter.load_candles("KRW-ETH", 1, 30).unwrap_err();
        assert!(err.to_string().contains("missing close"));
    }

    #[test]
    fn load_candles_trims_to_expected_count() {
        let dir = TempDir::new().unwrap();
        let mut content = String::from("time,open,high,low,close,quote\n");
        for i in 0..12 {
            content.push_str(&format!("2024-01-{:02}T00:00:00,1,1,1,{},1\n", i + 1, i));
        }
        fs::write(dir.path().join("KRW-BTC_1440m_1d.csv"), content).unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let candles = adapter.load_candles("KRW-BTC", 1440, 1).unwrap();

        assert_eq!(candles.len(), 10);
        assert_eq!(candles[0].close, 2.0);
    }
}
