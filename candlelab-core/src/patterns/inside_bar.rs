//! Inside bar detection.
//!
//! The last candle's full range sits strictly inside the previous ("mother")
//! candle's range. The reported bias comes from the inside bar's own body
//! color only; it does not predict the breakout direction.

use crate::domain::Candle;

use super::{Bias, PatternKind};

/// Detect an inside bar on the last two candles.
pub fn detect(candles: &[Candle]) -> Option<PatternKind> {
    if candles.len() < 2 {
        return None;
    }
    let mother = &candles[candles.len() - 2];
    let curr = &candles[candles.len() - 1];

    if curr.high < mother.high && curr.low > mother.low {
        let bias = if curr.is_bullish() {
            Bias::Bullish
        } else if curr.is_bearish() {
            Bias::Bearish
        } else {
            Bias::Neutral
        };
        return Some(PatternKind::InsideBar {
            bias,
            mother_high: mother.high,
            mother_low: mother.low,
        });
    }

    None
}
