//! Analyzer configuration.
//!
//! Every threshold the analyzers honor lives here as an explicit field with a
//! default matching the production values. Several of them (the Wyckoff
//! support/resistance window offsets, the SMC materiality multiplier) are
//! empirically chosen constants; they stay configurable defaults and are
//! never re-derived, because changing them changes signal output.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the whole engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub indicators: IndicatorConfig,
    pub patterns: PatternConfig,
    pub wyckoff: WyckoffConfig,
    pub smc: SmcConfig,
    pub risk: RiskConfig,
}

/// Technical indicator periods and RSI zone thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub atr_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            ema_fast: 50,
            ema_slow: 200,
            atr_period: 14,
        }
    }
}

/// Candlestick pattern thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Minimum wick/body ratio for a pinbar.
    pub pinbar_tail_ratio: f64,
    /// Maximum body/range ratio for a doji.
    pub doji_threshold: f64,
    /// Floor applied to the candle body to avoid division by zero on
    /// degenerate bars, in price units.
    pub body_epsilon: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            pinbar_tail_ratio: 2.5,
            doji_threshold: 0.1,
            body_epsilon: 0.01,
        }
    }
}

/// Wyckoff analyzer windows and event thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WyckoffConfig {
    /// Rolling window the analyzer considers.
    pub lookback: usize,
    /// Minimum series length; below this the result is Unknown/empty.
    pub min_bars: usize,
    /// Trailing bars used for phase classification.
    pub phase_window: usize,
    /// Relative range below which the market counts as ranging.
    pub range_threshold: f64,
    /// Cumulative return beyond which the market counts as trending.
    pub trend_threshold: f64,
    /// Support/resistance reference window: bars [-far, -near] from the tail.
    pub level_window_far: usize,
    pub level_window_near: usize,
    /// How many of the latest candles are scanned for Spring/Upthrust.
    pub event_scan: usize,
    /// Minimum wick-to-spread ratio for Spring/Upthrust rejection.
    pub wick_ratio: f64,
    /// Volume multiple over the series mean that counts as confirmation.
    pub volume_confirm: f64,
    /// SOS/SOW spread multiple over the rolling spread average.
    pub sos_spread_multiplier: f64,
    /// SOS/SOW volume multiple over the rolling volume average.
    pub sos_volume_multiplier: f64,
}

impl Default for WyckoffConfig {
    fn default() -> Self {
        Self {
            lookback: 50,
            min_bars: 20,
            phase_window: 30,
            range_threshold: 0.03,
            trend_threshold: 0.02,
            level_window_far: 30,
            level_window_near: 10,
            event_scan: 5,
            wick_ratio: 0.5,
            volume_confirm: 1.2,
            sos_spread_multiplier: 1.5,
            sos_volume_multiplier: 1.3,
        }
    }
}

/// Smart Money Concepts thresholds and retention limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmcConfig {
    /// Minimum series length; below this the result is empty/Unknown.
    pub min_bars: usize,
    /// A gap must exceed this multiple of the average spread to count as FVG.
    pub fvg_materiality: f64,
    /// How many unmitigated FVGs are retained (most recent first dropped last).
    pub max_active_fvgs: usize,
    /// How many unmitigated order blocks are retained.
    pub max_active_order_blocks: usize,
    /// Close-to-close move multiple over the mean move that marks an order block.
    pub ob_move_multiplier: f64,
    /// Relative tolerance for two swing levels to count as equal.
    pub equal_level_tolerance: f64,
    /// Bars on each side a swing point must dominate.
    pub swing_strength: usize,
}

impl Default for SmcConfig {
    fn default() -> Self {
        Self {
            min_bars: 10,
            fvg_materiality: 0.3,
            max_active_fvgs: 5,
            max_active_order_blocks: 3,
            ob_move_multiplier: 2.0,
            equal_level_tolerance: 0.002,
            swing_strength: 2,
        }
    }
}

/// Risk management parameters for lot-size arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Account capital in quote currency.
    pub capital: f64,
    /// Fraction of capital risked per trade.
    pub risk_percent: f64,
    pub min_lot: f64,
    pub max_lot: f64,
    /// Fraction of capital lost in a day after which trading stops.
    pub max_daily_loss: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            capital: 100.0,
            risk_percent: 0.02,
            min_lot: 0.01,
            max_lot: 1.0,
            max_daily_loss: 0.06,
        }
    }
}
