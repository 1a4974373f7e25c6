//! Fair Value Gap detection at the series tail.
//!
//! Three-candle imbalance: a bullish FVG exists when the latest candle's low
//! sits above the high of the candle two back: the middle candle never
//! traded the gap. The bearish case mirrors on highs/lows. The SMC analyzer
//! applies the same geometry across the whole series with a materiality
//! filter; this detector reports only the freshest gap, unfiltered.

use crate::domain::{Candle, Direction};

use super::PatternKind;

/// Detect a fair value gap on the last three candles.
pub fn detect(candles: &[Candle]) -> Option<PatternKind> {
    if candles.len() < 3 {
        return None;
    }
    let first = &candles[candles.len() - 3];
    let last = &candles[candles.len() - 1];

    if last.low > first.high {
        return Some(PatternKind::FairValueGap {
            direction: Direction::Bullish,
            top: last.low,
            bottom: first.high,
            size: last.low - first.high,
        });
    }
    if last.high < first.low {
        return Some(PatternKind::FairValueGap {
            direction: Direction::Bearish,
            top: first.low,
            bottom: last.high,
            size: first.low - last.high,
        });
    }

    None
}
