#![allow(dead_code)]

use candlesim::domain::candle::Candle;
use candlesim::domain::error::CandlesimError;
use candlesim::domain::strategy::StrategyParams;
use candlesim::ports::data_port::CandlePort;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::io::Write;

pub struct MockCandlePort {
    pub data: HashMap<u32, Vec<Candle>>,
    pub errors: HashMap<u32, String>,
}

impl MockCandlePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_candles(mut self, unit: u32, candles: Vec<Candle>) -> Self {
        self.data.insert(unit, candles);
        self
    }

    pub fn with_error(mut self, unit: u32, reason: &str) -> Self {
        self.errors.insert(unit, reason.to_string());
        self
    }
}

impl CandlePort for MockCandlePort {
    fn load_candles(
        &self,
        _market: &str,
        unit_minutes: u32,
        _days: u32,
    ) -> Result<Vec<Candle>, CandlesimError> {
        if let Some(reason) = self.errors.get(&unit_minutes) {
            return Err(CandlesimError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(&unit_minutes).cloned().unwrap_or_default())
    }
}

pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Candle whose high, low and open all equal the close.
pub fn make_candle(index: usize, close: f64) -> Candle {
    Candle {
        time: start_time() + Duration::minutes(index as i64),
        open: close,
        high: close,
        low: close,
        close,
        quote_volume: 1_000_000.0,
    }
}

pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_candle(i, c))
        .collect()
}

/// `n` closes rising by `step` from `start`.
pub fn ramp(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Short windows with every optional filter off so that a plain rise
/// enters after four candles.
pub fn easy_params() -> StrategyParams {
    StrategyParams {
        ma_short: 2,
        ma_long: 4,
        ma_long_slope_lookback: 0,
        ma_long_slope_min: 0.0,
        max_extension_pct: 0.0,
        rsi_period: 3,
        macd_fast: 2,
        macd_slow: 3,
        macd_signal: 2,
        min_adx: 0.0,
        min_volume_ratio: 0.0,
        boll_window: 0,
        breakout_lookback: 3,
        breakout_pct: 0.0,
        min_confirmations: 1,
        trailing_window: 0,
        target_vol_pct: 0.0,
        reentry_cooldown: 0,
        stop_loss_cooldown: 0,
        partial_take_profit_cooldown: 0,
        ..StrategyParams::default()
    }
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
