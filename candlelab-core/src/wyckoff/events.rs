//! Spring / Upthrust / SOS / SOW detection.
//!
//! Spring and Upthrust measure false breakouts against a reference level
//! taken from the older part of the window (the trailing `level_window_far`
//! bars minus the most recent `level_window_near`), so the level is not
//! polluted by the breakout bar itself. SOS/SOW look only at the last bar
//! against its rolling spread/volume baselines.

use crate::config::WyckoffConfig;
use crate::domain::Candle;
use crate::preprocess::SeriesStats;

use super::{EventKind, WyckoffEvent};

/// Minimum bars for the false-breakout detectors.
const MIN_BREAKOUT_BARS: usize = 10;
/// Minimum bars for the effort detectors (SOS/SOW).
const MIN_EFFORT_BARS: usize = 5;
/// Confidence cap for false-breakout events.
const MAX_BREAKOUT_CONFIDENCE: f64 = 95.0;
/// Fixed confidence for SOS/SOW.
const EFFORT_CONFIDENCE: f64 = 75.0;

/// The slice the support/resistance level is measured over.
fn reference_window<'a>(candles: &'a [Candle], cfg: &WyckoffConfig) -> &'a [Candle] {
    let len = candles.len();
    let start = len.saturating_sub(cfg.level_window_far);
    let count = (len - start).min(cfg.level_window_far - cfg.level_window_near);
    &candles[start..start + count]
}

/// Spring: a dip below support that closes back above it on a long lower
/// wick. The earliest qualifying bar in the scan range wins.
pub(super) fn detect_spring(
    candles: &[Candle],
    stats: &SeriesStats,
    cfg: &WyckoffConfig,
) -> Option<WyckoffEvent> {
    if candles.len() < MIN_BREAKOUT_BARS {
        return None;
    }
    let support = reference_window(candles, cfg)
        .iter()
        .map(|c| c.low)
        .fold(f64::MAX, f64::min);

    let scan_start = candles.len().saturating_sub(cfg.event_scan);
    for candle in &candles[scan_start..] {
        if candle.low < support && candle.close > support {
            let spread = candle.spread();
            let wick_ratio = if spread > 0.0 {
                candle.lower_wick() / spread
            } else {
                0.0
            };
            if wick_ratio > cfg.wick_ratio {
                let volume_confirmed = candle.volume > cfg.volume_confirm * stats.mean_volume;
                let confidence = breakout_confidence(wick_ratio, volume_confirmed);
                return Some(WyckoffEvent {
                    kind: EventKind::Spring,
                    confidence,
                    price_level: support,
                    volume_confirmed,
                    description: format!(
                        "Spring: false breakdown below support {support:.2} with recovery close"
                    ),
                });
            }
        }
    }
    None
}

/// Upthrust: the mirror of a Spring against resistance.
pub(super) fn detect_upthrust(
    candles: &[Candle],
    stats: &SeriesStats,
    cfg: &WyckoffConfig,
) -> Option<WyckoffEvent> {
    if candles.len() < MIN_BREAKOUT_BARS {
        return None;
    }
    let resistance = reference_window(candles, cfg)
        .iter()
        .map(|c| c.high)
        .fold(f64::MIN, f64::max);

    let scan_start = candles.len().saturating_sub(cfg.event_scan);
    for candle in &candles[scan_start..] {
        if candle.high > resistance && candle.close < resistance {
            let spread = candle.spread();
            let wick_ratio = if spread > 0.0 {
                candle.upper_wick() / spread
            } else {
                0.0
            };
            if wick_ratio > cfg.wick_ratio {
                let volume_confirmed = candle.volume > cfg.volume_confirm * stats.mean_volume;
                let confidence = breakout_confidence(wick_ratio, volume_confirmed);
                return Some(WyckoffEvent {
                    kind: EventKind::Upthrust,
                    confidence,
                    price_level: resistance,
                    volume_confirmed,
                    description: format!(
                        "Upthrust: false breakout above resistance {resistance:.2} with rejection close"
                    ),
                });
            }
        }
    }
    None
}

fn breakout_confidence(wick_ratio: f64, volume_confirmed: bool) -> f64 {
    let base = 70.0 + wick_ratio * 20.0 + if volume_confirmed { 10.0 } else { 0.0 };
    base.min(MAX_BREAKOUT_CONFIDENCE)
}

/// Sign of Strength: a wide bullish bar on expanded volume closing above the
/// previous bar's high. Requires the rolling baselines, so a series shorter
/// than the rolling window never fires.
pub(super) fn detect_sos(
    candles: &[Candle],
    stats: &SeriesStats,
    cfg: &WyckoffConfig,
) -> Option<WyckoffEvent> {
    if candles.len() < MIN_EFFORT_BARS {
        return None;
    }
    let spread_sma = stats.last_spread_sma()?;
    let vol_sma = stats.last_vol_sma()?;
    let last = &candles[candles.len() - 1];
    let prev = &candles[candles.len() - 2];

    if last.is_bullish()
        && last.spread() > cfg.sos_spread_multiplier * spread_sma
        && last.volume > cfg.sos_volume_multiplier * vol_sma
        && last.close > prev.high
    {
        return Some(WyckoffEvent {
            kind: EventKind::Sos,
            confidence: EFFORT_CONFIDENCE,
            price_level: last.close,
            volume_confirmed: true,
            description: format!(
                "Sign of Strength: wide-spread advance through {:.2} on expanded volume",
                prev.high
            ),
        });
    }
    None
}

/// Sign of Weakness: the bearish mirror of SOS.
pub(super) fn detect_sow(
    candles: &[Candle],
    stats: &SeriesStats,
    cfg: &WyckoffConfig,
) -> Option<WyckoffEvent> {
    if candles.len() < MIN_EFFORT_BARS {
        return None;
    }
    let spread_sma = stats.last_spread_sma()?;
    let vol_sma = stats.last_vol_sma()?;
    let last = &candles[candles.len() - 1];
    let prev = &candles[candles.len() - 2];

    if last.is_bearish()
        && last.spread() > cfg.sos_spread_multiplier * spread_sma
        && last.volume > cfg.sos_volume_multiplier * vol_sma
        && last.close < prev.low
    {
        return Some(WyckoffEvent {
            kind: EventKind::Sow,
            confidence: EFFORT_CONFIDENCE,
            price_level: last.close,
            volume_confirmed: true,
            description: format!(
                "Sign of Weakness: wide-spread decline through {:.2} on expanded volume",
                prev.low
            ),
        });
    }
    None
}
