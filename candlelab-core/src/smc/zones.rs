//! Supply/demand zones: fair value gaps and order blocks.
//!
//! A zone stays interesting only until price trades back through it, so both
//! detectors drop mitigated zones and report the freshest few survivors,
//! oldest first.

use serde::{Deserialize, Serialize};

use crate::config::SmcConfig;
use crate::domain::{Candle, Direction};
use crate::preprocess::SeriesStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    FairValueGap,
    OrderBlock,
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::FairValueGap => "FVG",
            Self::OrderBlock => "ORDER_BLOCK",
        };
        write!(f, "{s}")
    }
}

/// A price zone with a directional read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    pub direction: Direction,
    pub top: f64,
    pub bottom: f64,
    /// 0–100.
    pub strength: f64,
    /// True once a later candle has traded back into the zone.
    pub mitigated: bool,
    /// Index of the bar that completed the zone.
    pub formed_at: usize,
}

impl Zone {
    pub fn contains(&self, price: f64) -> bool {
        self.bottom <= price && price <= self.top
    }
}

/// True when any candle after `formed_at` overlaps [bottom, top].
fn is_tested(candles: &[Candle], bottom: f64, top: f64, formed_at: usize) -> bool {
    candles[formed_at + 1..]
        .iter()
        .any(|c| c.low <= top && c.high >= bottom)
}

/// Scan the whole series for three-candle imbalances.
///
/// A gap only counts when it exceeds `fvg_materiality` of the mean spread;
/// strength scales with the same ratio. Returns the last `max_active_fvgs`
/// unmitigated gaps, oldest first.
pub(super) fn detect_fvgs(candles: &[Candle], stats: &SeriesStats, cfg: &SmcConfig) -> Vec<Zone> {
    let mut zones = Vec::new();
    if stats.mean_spread <= 0.0 {
        return zones;
    }

    for i in 2..candles.len() {
        let first = &candles[i - 2];
        let third = &candles[i];

        let (direction, top, bottom) = if third.low > first.high {
            (Direction::Bullish, third.low, first.high)
        } else if third.high < first.low {
            (Direction::Bearish, first.low, third.high)
        } else {
            continue;
        };

        let gap = top - bottom;
        if gap > stats.mean_spread * cfg.fvg_materiality {
            let mitigated = is_tested(candles, bottom, top, i);
            if !mitigated {
                zones.push(Zone {
                    kind: ZoneKind::FairValueGap,
                    direction,
                    top,
                    bottom,
                    strength: (gap / stats.mean_spread * 50.0).min(100.0),
                    mitigated,
                    formed_at: i,
                });
            }
        }
    }

    truncate_front(zones, cfg.max_active_fvgs)
}

/// Scan for order blocks: the last opposing candle before a strong move.
///
/// A move is strong when the next close jumps more than `ob_move_multiplier`
/// times the mean absolute close change. Returns the last
/// `max_active_order_blocks` unmitigated blocks, oldest first.
pub(super) fn detect_order_blocks(
    candles: &[Candle],
    stats: &SeriesStats,
    cfg: &SmcConfig,
) -> Vec<Zone> {
    let mut zones = Vec::new();
    if candles.len() < 5 {
        return zones;
    }
    let avg_move = stats.mean_abs_close_change;

    for i in 3..candles.len() - 1 {
        let current = &candles[i];
        let next = &candles[i + 1];
        let mv = next.close - current.close;

        if mv.abs() > avg_move * cfg.ob_move_multiplier {
            // A bullish move marks the last bearish candle as demand, and
            // the mirror for supply.
            let direction = if mv > 0.0 && current.is_bearish() {
                Direction::Bullish
            } else if mv < 0.0 && current.is_bullish() {
                Direction::Bearish
            } else {
                continue;
            };
            if !is_tested(candles, current.low, current.high, i) {
                let strength = if avg_move > 0.0 {
                    (mv.abs() / avg_move * 30.0).min(100.0)
                } else {
                    100.0
                };
                zones.push(Zone {
                    kind: ZoneKind::OrderBlock,
                    direction,
                    top: current.high,
                    bottom: current.low,
                    strength,
                    mitigated: false,
                    formed_at: i,
                });
            }
        }
    }

    truncate_front(zones, cfg.max_active_order_blocks)
}

/// Keep the last `keep` entries, preserving order.
fn truncate_front(mut zones: Vec<Zone>, keep: usize) -> Vec<Zone> {
    if zones.len() > keep {
        zones.drain(..zones.len() - keep);
    }
    zones
}
