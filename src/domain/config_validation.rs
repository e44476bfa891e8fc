//! Configuration validation.
//!
//! Range checks on the strategy parameters and on the `[backtest]` run
//! settings, applied before any simulation starts.

use crate::domain::error::CandlesimError;
use crate::domain::strategy::StrategyParams;
use crate::ports::config_port::ConfigPort;

pub const CANDLE_FORMATS: [&str; 2] = ["json", "csv"];

pub fn validate_params(params: &StrategyParams) -> Result<(), CandlesimError> {
    validate_cash(params)?;
    validate_order_bounds(params)?;
    validate_cost_rate(params)?;
    validate_windows(params)?;
    validate_percentages(params)?;
    validate_exit_percentages(params)?;
    validate_confirmations(params)?;
    Ok(())
}

/// `[backtest]` settings that are not strategy parameters. Absent keys
/// are fine; they take their defaults.
pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), CandlesimError> {
    validate_market(config)?;
    validate_days(config)?;
    validate_format(config)?;
    Ok(())
}

/// Candle length in minutes.
pub fn validate_unit(unit_minutes: u32) -> Result<(), CandlesimError> {
    if unit_minutes == 0 {
        return Err(CandlesimError::invalid_config("unit", "unit must be positive"));
    }
    Ok(())
}

/// Market and period a run actually uses, after any command-line overrides.
pub fn validate_run_target(market: &str, days: u32) -> Result<(), CandlesimError> {
    validate_market_name(market)?;
    if days == 0 {
        return Err(CandlesimError::invalid_config("days", "days must be positive"));
    }
    Ok(())
}

fn validate_cash(params: &StrategyParams) -> Result<(), CandlesimError> {
    if params.initial_cash.is_nan() || params.initial_cash <= 0.0 {
        return Err(CandlesimError::invalid_config(
            "initial_cash",
            "initial_cash must be positive",
        ));
    }
    Ok(())
}

fn validate_order_bounds(params: &StrategyParams) -> Result<(), CandlesimError> {
    if params.min_order_krw < 0.0 {
        return Err(CandlesimError::invalid_config(
            "min_order_krw",
            "min_order_krw must be non-negative",
        ));
    }
    if params.max_order_krw < params.min_order_krw {
        return Err(CandlesimError::invalid_config(
            "max_order_krw",
            "max_order_krw must not be below min_order_krw",
        ));
    }
    Ok(())
}

fn validate_cost_rate(params: &StrategyParams) -> Result<(), CandlesimError> {
    if !(0.0..1.0).contains(&params.trade_cost_rate) {
        return Err(CandlesimError::invalid_config(
            "trade_cost_rate",
            "trade_cost_rate must be in [0, 1)",
        ));
    }
    Ok(())
}

fn validate_windows(params: &StrategyParams) -> Result<(), CandlesimError> {
    let windows = [
        ("ma_short", params.ma_short),
        ("ma_long", params.ma_long),
        ("rsi_period", params.rsi_period),
        ("macd_fast", params.macd_fast),
        ("macd_slow", params.macd_slow),
        ("macd_signal", params.macd_signal),
        ("adx_period", params.adx_period),
    ];
    if let Some((key, _)) = windows.iter().find(|(_, w)| *w == 0) {
        return Err(CandlesimError::invalid_config(key, format!("{key} must be positive")));
    }
    if params.ma_short >= params.ma_long {
        return Err(CandlesimError::invalid_config(
            "ma_short",
            "ma_short must be shorter than ma_long",
        ));
    }
    if params.macd_fast >= params.macd_slow {
        return Err(CandlesimError::invalid_config(
            "macd_fast",
            "macd_fast must be shorter than macd_slow",
        ));
    }
    Ok(())
}

fn validate_percentages(params: &StrategyParams) -> Result<(), CandlesimError> {
    let pcts = [
        ("stop_loss_pct", params.stop_loss_pct),
        ("take_profit_pct", params.take_profit_pct),
        ("trailing_stop_pct", params.trailing_stop_pct),
        ("max_extension_pct", params.max_extension_pct),
        ("breakout_pct", params.breakout_pct),
        ("boll_stddev", params.boll_stddev),
        ("boll_min_bandwidth_pct", params.boll_min_bandwidth_pct),
        ("boll_max_percent_b", params.boll_max_percent_b),
        ("min_adx", params.min_adx),
        ("min_volume_ratio", params.min_volume_ratio),
        ("target_vol_pct", params.target_vol_pct),
    ];
    match pcts.iter().find(|(_, v)| *v < 0.0 || v.is_nan()) {
        Some((key, _)) => Err(CandlesimError::invalid_config(
            key,
            format!("{key} must be non-negative"),
        )),
        None => Ok(()),
    }
}

fn validate_exit_percentages(params: &StrategyParams) -> Result<(), CandlesimError> {
    let pcts = [
        ("partial_take_profit_pct", params.partial_take_profit_pct),
        ("stop_exit_pct", params.stop_exit_pct),
        ("trend_exit_pct", params.trend_exit_pct),
        ("momentum_exit_pct", params.momentum_exit_pct),
    ];
    match pcts.iter().find(|(_, v)| !(0.0..=100.0).contains(v)) {
        Some((key, _)) => Err(CandlesimError::invalid_config(
            key,
            format!("{key} must be between 0 and 100"),
        )),
        None => Ok(()),
    }
}

fn validate_confirmations(params: &StrategyParams) -> Result<(), CandlesimError> {
    if params.min_confirmations > 3 {
        return Err(CandlesimError::invalid_config(
            "min_confirmations",
            "min_confirmations must be at most 3",
        ));
    }
    Ok(())
}

fn validate_market(config: &dyn ConfigPort) -> Result<(), CandlesimError> {
    match config.get_string("backtest", "market") {
        Some(market) => validate_market_name(&market),
        None => Ok(()),
    }
}

fn validate_market_name(market: &str) -> Result<(), CandlesimError> {
    if market.trim().is_empty() {
        return Err(CandlesimError::invalid_config("market", "market must not be empty"));
    }
    Ok(())
}

fn validate_days(config: &dyn ConfigPort) -> Result<(), CandlesimError> {
    let days = config.get_int("backtest", "days", 30);
    if days <= 0 {
        return Err(CandlesimError::invalid_config("days", "days must be positive"));
    }
    Ok(())
}

fn validate_format(config: &dyn ConfigPort) -> Result<(), CandlesimError> {
    let Some(format) = config.get_string("backtest", "format") else {
        return Ok(());
    };
    let name = format.trim();
    if !CANDLE_FORMATS.iter().any(|f| f.eq_ignore_ascii_case(name)) {
        return Err(CandlesimError::invalid_config(
            "format",
            format!("unknown candle format '{name}', expected json or csv"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    fn key_of(err: CandlesimError) -> String {
        match err {
            CandlesimError::InvalidConfiguration { key, .. } => key,
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn defaults_pass() {
        assert!(validate_params(&StrategyParams::default()).is_ok());
        assert!(validate_params(&StrategyParams::for_timeframe(15)).is_ok());
    }

    #[test]
    fn cash_must_be_positive() {
        let p = StrategyParams {
            initial_cash: 0.0,
            ..StrategyParams::default()
        };
        assert_eq!(key_of(validate_params(&p).unwrap_err()), "initial_cash");
    }

    #[test]
    fn order_bounds() {
        let p = StrategyParams {
            min_order_krw: -1.0,
            ..StrategyParams::default()
        };
        assert_eq!(key_of(validate_params(&p).unwrap_err()), "min_order_krw");

        let p = StrategyParams {
            max_order_krw: 1_000.0,
            ..StrategyParams::default()
        };
        assert_eq!(key_of(validate_params(&p).unwrap_err()), "max_order_krw");
    }

    #[test]
    fn cost_rate_range() {
        let p = StrategyParams {
            trade_cost_rate: 1.0,
            ..StrategyParams::default()
        };
        assert_eq!(key_of(validate_params(&p).unwrap_err()), "trade_cost_rate");
    }

    #[test]
    fn zero_window_rejected() {
        let p = StrategyParams {
            rsi_period: 0,
            ..StrategyParams::default()
        };
        assert_eq!(key_of(validate_params(&p).unwrap_err()), "rsi_period");
    }

    #[test]
    fn ma_ordering() {
        let p = StrategyParams {
            ma_short: 100,
            ..StrategyParams::default()
        };
        assert_eq!(key_of(validate_params(&p).unwrap_err()), "ma_short");
    }

    #[test]
    fn macd_ordering() {
        let p = StrategyParams {
            macd_fast: 26,
            ..StrategyParams::default()
        };
        assert_eq!(key_of(validate_params(&p).unwrap_err()), "macd_fast");
    }

    #[test]
    fn negative_percentage_rejected() {
        let p = StrategyParams {
            trailing_stop_pct: -0.5,
            ..StrategyParams::default()
        };
        assert_eq!(key_of(validate_params(&p).unwrap_err()), "trailing_stop_pct");
    }

    #[test]
    fn exit_percentage_range() {
        let p = StrategyParams {
            stop_exit_pct: 120.0,
            ..StrategyParams::default()
        };
        assert_eq!(key_of(validate_params(&p).unwrap_err()), "stop_exit_pct");
    }

    #[test]
    fn confirmations_capped() {
        let p = StrategyParams {
            min_confirmations: 4,
            ..StrategyParams::default()
        };
        assert_eq!(key_of(validate_params(&p).unwrap_err()), "min_confirmations");
    }

    #[test]
    fn run_config_passes() {
        let config = make_config("[backtest]\nmarket = KRW-BTC\ndays = 30\nformat = csv\n");
        assert!(validate_run_config(&config).is_ok());
    }

    #[test]
    fn run_config_missing_keys_pass() {
        let config = make_config("[backtest]\ndays = 30\n");
        assert!(validate_run_config(&config).is_ok());
        assert!(validate_run_config(&make_config("[strategy]\n")).is_ok());
    }

    #[test]
    fn run_config_blank_market() {
        let config = make_config("[backtest]\nmarket =   \n");
        assert_eq!(key_of(validate_run_config(&config).unwrap_err()), "market");
    }

    #[test]
    fn run_config_format_ignores_case_and_padding() {
        let config = make_config("[backtest]\nformat = CSV\n");
        assert!(validate_run_config(&config).is_ok());
        let config = make_config("[backtest]\nformat = Json \n");
        assert!(validate_run_config(&config).is_ok());
    }

    #[test]
    fn run_target_checks() {
        assert!(validate_run_target("KRW-BTC", 30).is_ok());
        assert_eq!(key_of(validate_run_target("", 30).unwrap_err()), "market");
        assert_eq!(key_of(validate_run_target("KRW-BTC", 0).unwrap_err()), "days");
    }

    #[test]
    fn unit_must_be_positive() {
        assert!(validate_unit(1).is_ok());
        assert!(validate_unit(240).is_ok());
        assert_eq!(key_of(validate_unit(0).unwrap_err()), "unit");
    }

    #[test]
    fn run_config_bad_days() {
        let config = make_config("[backtest]\nmarket = KRW-BTC\ndays = 0\n");
        assert_eq!(key_of(validate_run_config(&config).unwrap_err()), "days");
    }

    #[test]
    fn run_config_unknown_format() {
        let config = make_config("[backtest]\nmarket = KRW-BTC\nformat = parquet\n");
        assert_eq!(key_of(validate_run_config(&config).unwrap_err()), "format");
    }
}
