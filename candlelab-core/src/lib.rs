//! CandleLab Core: market-structure classification engine.
//!
//! This crate turns a raw OHLCV candle series into discrete, labeled
//! market-structure observations:
//! - Series preprocessing (rolling volume/spread stats, body/wick decomposition)
//! - Technical indicators (RSI, fast/slow EMA, ATR) with a textual summary
//! - Candlestick pattern detection (pinbar, engulfing, inside bar, doji, FVG)
//! - Wyckoff phase classification and event detection (Spring, Upthrust, SOS, SOW)
//! - Smart Money Concepts analysis (FVG/order-block zones with mitigation,
//!   liquidity pools, sweeps, market structure)
//!
//! All analyzers are pure functions of the input series: no shared state, no
//! I/O, no clock dependence. Short or degenerate input degrades to typed
//! "unknown/empty" results, never to an error. The final products are the
//! per-analyzer result records plus an assembled textual context for an
//! external arbitration step.

pub mod config;
pub mod context;
pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod patterns;
pub mod preprocess;
pub mod risk;
pub mod signal;
pub mod smc;
pub mod wyckoff;

#[cfg(test)]
pub(crate) mod testutil;
