//! Candlestick pattern detection.
//!
//! Stateless, single-purpose detectors evaluated against the most recent
//! one to three candles of a series. Every detector returns
//! `Option<PatternKind>`, with `None` covering both "nothing there" and
//! "not enough history", and the
//! report aggregates whichever detectors fired.

pub mod doji;
pub mod engulfing;
pub mod fvg;
pub mod inside_bar;
pub mod pinbar;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PatternConfig;
use crate::domain::{Candle, Direction};

/// Directional bias of an inside bar, read from its own body color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

/// Sub-classification of a doji by wick dominance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DojiShape {
    Plain,
    Gravestone,
    Dragonfly,
}

/// A detected candlestick pattern with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatternKind {
    Pinbar {
        direction: Direction,
        /// 0–100, scaled from the wick/body ratio.
        strength: f64,
    },
    Engulfing {
        direction: Direction,
        /// Fixed at 85.
        strength: f64,
    },
    InsideBar {
        bias: Bias,
        mother_high: f64,
        mother_low: f64,
    },
    Doji {
        shape: DojiShape,
    },
    FairValueGap {
        direction: Direction,
        top: f64,
        bottom: f64,
        size: f64,
    },
}

impl PatternKind {
    /// Canonical uppercase label, e.g. `BULLISH_ENGULFING`.
    pub fn label(&self) -> String {
        match self {
            Self::Pinbar { direction, .. } => format!("{direction}_PINBAR"),
            Self::Engulfing { direction, .. } => format!("{direction}_ENGULFING"),
            Self::InsideBar { .. } => "INSIDE_BAR".to_string(),
            Self::Doji { shape } => match shape {
                DojiShape::Plain => "DOJI".to_string(),
                DojiShape::Gravestone => "GRAVESTONE_DOJI".to_string(),
                DojiShape::Dragonfly => "DRAGONFLY_DOJI".to_string(),
            },
            Self::FairValueGap { direction, .. } => format!("{direction}_FVG"),
        }
    }

    /// Human-readable description for the arbitration context.
    pub fn description(&self) -> String {
        match self {
            Self::Pinbar {
                direction: Direction::Bullish,
                ..
            } => "Hammer — long lower tail, bullish reversal hint".to_string(),
            Self::Pinbar {
                direction: Direction::Bearish,
                ..
            } => "Shooting star — long upper tail, bearish reversal hint".to_string(),
            Self::Engulfing {
                direction: Direction::Bullish,
                ..
            } => "Bullish engulfing — strong reversal signal".to_string(),
            Self::Engulfing {
                direction: Direction::Bearish,
                ..
            } => "Bearish engulfing — strong reversal signal".to_string(),
            Self::InsideBar { .. } => {
                "Inside bar — consolidation, awaiting breakout".to_string()
            }
            Self::Doji { .. } => "Doji — market indecision".to_string(),
            Self::FairValueGap {
                direction: Direction::Bullish,
                ..
            } => "Bullish FVG — potential support zone".to_string(),
            Self::FairValueGap {
                direction: Direction::Bearish,
                ..
            } => "Bearish FVG — potential resistance zone".to_string(),
        }
    }

    /// Strength score where the pattern defines one.
    pub fn strength(&self) -> Option<f64> {
        match self {
            Self::Pinbar { strength, .. } | Self::Engulfing { strength, .. } => Some(*strength),
            _ => None,
        }
    }
}

/// Every pattern that fired at the tail of a series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternReport {
    pub patterns: Vec<PatternKind>,
}

impl PatternReport {
    /// Run all detectors against the series tail.
    pub fn scan(candles: &[Candle], cfg: &PatternConfig) -> Self {
        let patterns: Vec<PatternKind> = [
            pinbar::detect(candles, cfg),
            engulfing::detect(candles),
            inside_bar::detect(candles),
            doji::detect(candles, cfg),
            fvg::detect(candles),
        ]
        .into_iter()
        .flatten()
        .collect();

        debug!(detected = patterns.len(), "pattern scan complete");
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Render the report as text lines for the arbitration context.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for p in &self.patterns {
            let strength = match p.strength() {
                Some(s) => format!(" (strength: {s:.0})"),
                None => String::new(),
            };
            lines.push(format!("- {}: {}{strength}", p.label(), p.description()));
        }
        if self.patterns.is_empty() {
            lines.push("- No pattern detected".to_string());
        }
        lines.join("\n")
    }
}
