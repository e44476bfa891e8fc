//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_cache_adapter::JsonCacheAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::backtest::{self as simulation, SimulationResult};
use crate::domain::config_validation::{
    validate_params, validate_run_config, validate_run_target, validate_unit,
};
use crate::domain::error::CandlesimError;
use crate::domain::report::{recommend, summarize, timeframe_label, TimeframeSummary};
use crate::domain::strategy::StrategyParams;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::CandlePort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_MARKET: &str = "KRW-BTC";
pub const DEFAULT_DAYS: u32 = 30;
pub const DEFAULT_DATA_DIR: &str = "data/backtest";
pub const DEFAULT_UNITS: [u32; 2] = [1, 15];

#[derive(Parser, Debug)]
#[command(name = "candlesim", about = "Single-asset long-only candle backtester")]
pub struct Cli {
    /// Log at DEBUG level (every executed trade)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one backtest on a single timeframe
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Candle length in minutes
        #[arg(long, default_value_t = 1)]
        unit: u32,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        market: Option<String>,
        #[arg(long)]
        days: Option<u32>,
        #[arg(long, value_enum)]
        format: Option<CandleFormat>,
    },
    /// Backtest several timeframes and recommend one
    Compare {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated candle lengths in minutes
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_UNITS)]
        units: Vec<u32>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse and validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
        /// Candle lengths whose parameters are checked
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_UNITS)]
        units: Vec<u32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CandleFormat {
    Json,
    Csv,
}

/// Where candles come from and how results are presented.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub market: String,
    pub days: u32,
    pub data_dir: PathBuf,
    pub format: CandleFormat,
    pub print_trades: bool,
}

impl RunSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, CandlesimError> {
        validate_run_config(config)?;
        let format = match config.get_string("backtest", "format") {
            Some(s) => CandleFormat::from_str(s.trim(), true)
                .map_err(|reason| CandlesimError::invalid_config("format", reason))?,
            None => CandleFormat::Json,
        };
        let days = u32::try_from(config.get_int("backtest", "days", DEFAULT_DAYS as i64))
            .map_err(|_| CandlesimError::invalid_config("days", "days is out of range"))?;
        let settings = RunSettings {
            market: config
                .get_string("backtest", "market")
                .unwrap_or_else(|| DEFAULT_MARKET.to_string()),
            days,
            data_dir: config
                .get_string("backtest", "data_dir")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            format,
            print_trades: config.get_bool("backtest", "print_trades", false),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check the market and period the run will actually use.
    pub fn validate(&self) -> Result<(), CandlesimError> {
        validate_run_target(&self.market, self.days)
    }

    pub fn candle_source(&self) -> Box<dyn CandlePort + Sync> {
        match self.format {
            CandleFormat::Json => Box::new(JsonCacheAdapter::new(self.data_dir.clone())),
            CandleFormat::Csv => Box::new(CsvAdapter::new(self.data_dir.clone())),
        }
    }
}

/// Install the stderr log subscriber: INFO, or DEBUG when verbose.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::prelude::*;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    // A second install (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Backtest {
            config,
            unit,
            data_dir,
            market,
            days,
            format,
        } => load_config(&config).and_then(|adapter| {
            let mut settings = RunSettings::from_config(&adapter)?;
            if let Some(dir) = data_dir {
                settings.data_dir = dir;
            }
            if let Some(m) = market {
                settings.market = m;
            }
            if let Some(d) = days {
                settings.days = d;
            }
            if let Some(f) = format {
                settings.format = f;
            }
            let params = build_params(&adapter, unit);
            let source = settings.candle_source();
            run_backtest_pipeline(source.as_ref(), &settings, unit, &params).map(|_| ())
        }),
        Command::Compare {
            config,
            units,
            output,
        } => load_config(&config).and_then(|adapter| {
            let settings = RunSettings::from_config(&adapter)?;
            let source = settings.candle_source();
            let runs = plan_timeframes(&adapter, &units);
            let summaries = run_compare_pipeline(source.as_ref(), &settings, &runs)?;
            let report = JsonReportAdapter::new(output);
            report.write(&summaries, recommend(&summaries))
        }),
        Command::Validate { config, units } => run_validate(&config, &units),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, CandlesimError> {
    info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

/// Strategy parameters for a `unit_minutes` timeframe: defaults for that
/// timeframe, overridden by any key present in `[backtest]` or `[strategy]`.
pub fn build_params(config: &dyn ConfigPort, unit_minutes: u32) -> StrategyParams {
    let p = StrategyParams::for_timeframe(unit_minutes);
    let bt = |key: &str, default: f64| config.get_double("backtest", key, default);
    let f = |key: &str, default: f64| config.get_double("strategy", key, default);
    let n = |key: &str, default: usize| config.get_usize("strategy", key, default);

    StrategyParams {
        initial_cash: bt("initial_cash", p.initial_cash),
        max_order_krw: bt("max_order_krw", p.max_order_krw),
        min_order_krw: bt("min_order_krw", p.min_order_krw),
        trade_cost_rate: bt("trade_cost_rate", p.trade_cost_rate),

        ma_short: n("ma_short", p.ma_short),
        ma_long: n("ma_long", p.ma_long),
        ma_long_slope_lookback: n("ma_long_slope_lookback", p.ma_long_slope_lookback),
        ma_long_slope_min: f("ma_long_slope_min", p.ma_long_slope_min),
        max_extension_pct: f("max_extension_pct", p.max_extension_pct),

        rsi_period: n("rsi_period", p.rsi_period),
        rsi_buy_threshold: f("rsi_buy_threshold", p.rsi_buy_threshold),
        rsi_sell_threshold: f("rsi_sell_threshold", p.rsi_sell_threshold),
        rsi_overbought: f("rsi_overbought", p.rsi_overbought),
        macd_fast: n("macd_fast", p.macd_fast),
        macd_slow: n("macd_slow", p.macd_slow),
        macd_signal: n("macd_signal", p.macd_signal),

        adx_period: n("adx_period", p.adx_period),
        min_adx: f("min_adx", p.min_adx),
        volume_lookback: n("volume_lookback", p.volume_lookback),
        min_volume_ratio: f("min_volume_ratio", p.min_volume_ratio),

        boll_window: n("boll_window", p.boll_window),
        boll_stddev: f("boll_stddev", p.boll_stddev),
        boll_min_bandwidth_pct: f("boll_min_bandwidth_pct", p.boll_min_bandwidth_pct),
        boll_max_percent_b: f("boll_max_percent_b", p.boll_max_percent_b),
        breakout_lookback: n("breakout_lookback", p.breakout_lookback),
        breakout_pct: f("breakout_pct", p.breakout_pct),
        min_confirmations: n("min_confirmations", p.min_confirmations),

        trailing_window: n("trailing_window", p.trailing_window),
        stop_loss_pct: f("stop_loss_pct", p.stop_loss_pct),
        take_profit_pct: f("take_profit_pct", p.take_profit_pct),
        trailing_stop_pct: f("trailing_stop_pct", p.trailing_stop_pct),
        partial_take_profit_pct: f("partial_take_profit_pct", p.partial_take_profit_pct),
        stop_exit_pct: f("stop_exit_pct", p.stop_exit_pct),
        trend_exit_pct: f("trend_exit_pct", p.trend_exit_pct),
        momentum_exit_pct: f("momentum_exit_pct", p.momentum_exit_pct),

        reentry_cooldown: n("reentry_cooldown", p.reentry_cooldown),
        stop_loss_cooldown: n("stop_loss_cooldown", p.stop_loss_cooldown),
        partial_take_profit_cooldown: n(
            "partial_take_profit_cooldown",
            p.partial_take_profit_cooldown,
        ),

        volatility_window: n("volatility_window", p.volatility_window),
        target_vol_pct: f("target_vol_pct", p.target_vol_pct),
    }
}

/// One comparison run: label, candle unit and its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeframeRun {
    pub label: String,
    pub unit: u32,
    pub params: StrategyParams,
}

pub fn plan_timeframes(config: &dyn ConfigPort, units: &[u32]) -> Vec<TimeframeRun> {
    units
        .iter()
        .enumerate()
        .map(|(i, &unit)| TimeframeRun {
            label: timeframe_label(i, unit),
            unit,
            params: build_params(config, unit),
        })
        .collect()
}

pub fn run_backtest_pipeline(
    source: &dyn CandlePort,
    settings: &RunSettings,
    unit: u32,
    params: &StrategyParams,
) -> Result<SimulationResult, CandlesimError> {
    settings.validate()?;
    validate_unit(unit)?;
    validate_params(params)?;
    let candles = source.load_candles(&settings.market, unit, settings.days)?;
    info!(
        market = %settings.market,
        unit,
        candles = candles.len(),
        "running backtest"
    );
    let result = simulation::run(&candles, params)?;
    let summary = summarize("backtest", &result, settings.days, unit);

    println!("=== {} {}m over {} days ===", settings.market, unit, settings.days);
    println!("ROI:              {:.2}%", summary.roi_pct);
    println!("Max Drawdown:     -{:.2}%", summary.max_dd_pct);
    println!("Trades:           {}", result.trade_count);
    println!("Sell Trades:      {}", summary.sell_trades);
    println!("Trades/Day:       {:.2}", summary.trades_per_day);
    println!("Final Value:      {:.0}", summary.final_value);
    if settings.print_trades {
        println!("\n=== Trades ===");
        for t in &result.trades {
            println!(
                "  #{:<6} {:?} {:>14.2} qty {:.8} {}",
                t.step, t.side, t.price, t.quantity, t.reason
            );
        }
    }
    Ok(result)
}

/// Run every timeframe in parallel. Timeframes whose candles fail to load
/// or simulate are skipped with a warning; at least one must succeed.
pub fn run_compare_pipeline(
    source: &(dyn CandlePort + Sync),
    settings: &RunSettings,
    runs: &[TimeframeRun],
) -> Result<Vec<TimeframeSummary>, CandlesimError> {
    settings.validate()?;
    for run in runs {
        validate_unit(run.unit)?;
        validate_params(&run.params)?;
    }
    info!(market = %settings.market, timeframes = runs.len(), "comparing timeframes");

    let outcomes: Vec<Result<TimeframeSummary, CandlesimError>> = runs
        .par_iter()
        .map(|run| {
            let candles = source.load_candles(&settings.market, run.unit, settings.days)?;
            let result = simulation::run(&candles, &run.params)?;
            Ok(summarize(&run.label, &result, settings.days, run.unit))
        })
        .collect();

    let mut summaries = Vec::with_capacity(runs.len());
    for (run, outcome) in runs.iter().zip(outcomes) {
        match outcome {
            Ok(summary) => summaries.push(summary),
            Err(e) => warn!(label = %run.label, unit = run.unit, "skipping timeframe: {e}"),
        }
    }

    if summaries.is_empty() {
        return Err(CandlesimError::InvalidInput {
            reason: "no timeframe produced a result".to_string(),
        });
    }
    Ok(summaries)
}

pub fn run_validate(config_path: &Path, units: &[u32]) -> Result<(), CandlesimError> {
    let adapter = load_config(config_path)?;
    let settings = RunSettings::from_config(&adapter)?;
    for &unit in units {
        validate_unit(unit)?;
        validate_params(&build_params(&adapter, unit))?;
    }
    info!(
        market = %settings.market,
        days = settings.days,
        data_dir = %settings.data_dir.display(),
        "config validated successfully"
    );
    Ok(())
}
