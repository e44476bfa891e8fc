//! candlesim: single-asset, long-only strategy backtester.
//!
//! Hexagonal architecture: indicator math, decision rules and the simulation
//! driver live in [`domain`], port traits in [`ports`], concrete file-based
//! implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
