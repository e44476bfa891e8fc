//! Core domain types and logic.

pub mod candle;
pub mod indicator;
pub mod indicator_helpers;
pub mod position;
pub mod portfolio;
pub mod execution;
pub mod rule;
pub mod rule_eval;
pub mod strategy;
pub mod backtest;
pub mod metrics;
pub mod report;
pub mod config_validation;
pub mod error;
