//! Engulfing pattern detection.
//!
//! The last candle's body must strictly contain the previous candle's body,
//! with the two candles opposite in color. Strength is fixed at 85.

use crate::domain::{Candle, Direction};

use super::PatternKind;

const ENGULFING_STRENGTH: f64 = 85.0;

/// Detect an engulfing pattern on the last two candles.
pub fn detect(candles: &[Candle]) -> Option<PatternKind> {
    if candles.len() < 2 {
        return None;
    }
    let prev = &candles[candles.len() - 2];
    let curr = &candles[candles.len() - 1];

    let engulfs = curr.body_high() > prev.body_high() && curr.body_low() < prev.body_low();
    if !engulfs {
        return None;
    }

    if prev.is_bearish() && curr.is_bullish() {
        return Some(PatternKind::Engulfing {
            direction: Direction::Bullish,
            strength: ENGULFING_STRENGTH,
        });
    }
    if prev.is_bullish() && curr.is_bearish() {
        return Some(PatternKind::Engulfing {
            direction: Direction::Bearish,
            strength: ENGULFING_STRENGTH,
        });
    }

    None
}
