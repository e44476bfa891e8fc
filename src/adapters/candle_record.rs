//! On-disk candle row shared by the JSON cache and CSV adapters.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::candle::{Candle, CANDLE_TIME_FORMAT};
use crate::domain::error::CandlesimError;

/// One stored candle. Numeric fields are optional so a `null` (or empty
/// CSV cell) is reported as a data error rather than a parse panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleRecord {
    pub time: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub quote: Option<f64>,
}

impl CandleRecord {
    pub fn into_candle(self, row: usize) -> Result<Candle, CandlesimError> {
        let time = NaiveDateTime::parse_from_str(&self.time, CANDLE_TIME_FORMAT).map_err(|e| {
            CandlesimError::Data {
                reason: format!("row {row}: invalid time '{}': {e}", self.time),
            }
        })?;
        Ok(Candle {
            time,
            open: required(self.open, "open", row)?,
            high: required(self.high, "high", row)?,
            low: required(self.low, "low", row)?,
            close: required(self.close, "close", row)?,
            quote_volume: required(self.quote, "quote", row)?,
        })
    }
}

impl From<&Candle> for CandleRecord {
    fn from(c: &Candle) -> Self {
        CandleRecord {
            time: c.time.format(CANDLE_TIME_FORMAT).to_string(),
            open: Some(c.open),
            high: Some(c.high),
            low: Some(c.low),
            close: Some(c.close),
            quote: Some(c.quote_volume),
        }
    }
}

fn required(value: Option<f64>, field: &str, row: usize) -> Result<f64, CandlesimError> {
    value.ok_or_else(|| CandlesimError::Data {
        reason: format!("row {row}: missing {field} value"),
    })
}
