//! Volume Spread Analysis on the last bar.
//!
//! Efficiency is relative volume divided by relative spread: high efficiency
//! means effort (volume) without result (spread), i.e. absorption at the
//! bar's extreme; low efficiency means price moved easily on little volume.

use serde::{Deserialize, Serialize};

use crate::domain::Candle;
use crate::preprocess::SeriesStats;

/// Threshold above which effort without result reads as absorption.
const ABSORPTION_EFFICIENCY: f64 = 2.0;
/// Threshold below which movement reads as easy (low effort).
const EASY_MOVEMENT_EFFICIENCY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VsaSignal {
    /// Heavy volume, narrow spread, bullish close: demand absorbing supply.
    AbsorptionSupport,
    /// Heavy volume, narrow spread, bearish close: supply absorbing demand.
    AbsorptionResistance,
    /// Wide spread on light volume: no opposition to the move.
    EasyMovement,
    Neutral,
}

impl std::fmt::Display for VsaSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AbsorptionSupport => "ABSORPTION_SUPPORT",
            Self::AbsorptionResistance => "ABSORPTION_RESISTANCE",
            Self::EasyMovement => "EASY_MOVEMENT",
            Self::Neutral => "NEUTRAL",
        };
        write!(f, "{s}")
    }
}

/// One VSA reading for the last bar of the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VsaReading {
    pub signal: VsaSignal,
    /// relative volume / relative spread; 1.0 when baselines are missing.
    pub efficiency: f64,
    pub description: String,
}

/// Read the last bar against its rolling volume/spread baselines.
///
/// Missing or zero baselines degrade the relative measures to 1.0 rather
/// than failing, so a short series always yields a Neutral reading.
pub(super) fn analyze(candles: &[Candle], stats: &SeriesStats) -> VsaReading {
    let Some(last) = candles.last() else {
        return neutral("no bars to read");
    };
    if candles.len() < 3 {
        return neutral("insufficient history for volume analysis");
    }

    let rel_volume = match stats.last_vol_sma() {
        Some(sma) if sma > 0.0 => last.volume / sma,
        _ => 1.0,
    };
    let rel_spread = match stats.last_spread_sma() {
        Some(sma) if sma > 0.0 => last.spread() / sma,
        _ => 1.0,
    };
    let efficiency = if rel_spread > 0.0 {
        rel_volume / rel_spread
    } else {
        1.0
    };

    let (signal, description) = if efficiency > ABSORPTION_EFFICIENCY {
        if last.is_bullish() {
            (
                VsaSignal::AbsorptionSupport,
                "high volume with narrow spread on an up close: demand absorbing supply",
            )
        } else {
            (
                VsaSignal::AbsorptionResistance,
                "high volume with narrow spread on a down close: supply absorbing demand",
            )
        }
    } else if efficiency < EASY_MOVEMENT_EFFICIENCY {
        (
            VsaSignal::EasyMovement,
            "wide spread on light volume: price moving with little opposition",
        )
    } else {
        (VsaSignal::Neutral, "volume and spread in balance")
    };

    VsaReading {
        signal,
        efficiency,
        description: description.to_string(),
    }
}

fn neutral(description: &str) -> VsaReading {
    VsaReading {
        signal: VsaSignal::Neutral,
        efficiency: 1.0,
        description: description.to_string(),
    }
}
