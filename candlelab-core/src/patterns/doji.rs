//! Doji detection.
//!
//! A doji has a body no larger than `doji_threshold` of its full range.
//! Wick dominance sub-classifies it: upper > 2× lower → gravestone,
//! lower > 2× upper → dragonfly, otherwise plain. A zero-range bar carries
//! no information and is not detected.

use crate::config::PatternConfig;
use crate::domain::Candle;

use super::{DojiShape, PatternKind};

/// Detect a doji on the last candle of the series.
pub fn detect(candles: &[Candle], cfg: &PatternConfig) -> Option<PatternKind> {
    let last = candles.last()?;

    let full_range = last.spread();
    if full_range == 0.0 {
        return None;
    }

    if last.body() / full_range <= cfg.doji_threshold {
        let upper = last.upper_wick();
        let lower = last.lower_wick();
        let shape = if upper > lower * 2.0 {
            DojiShape::Gravestone
        } else if lower > upper * 2.0 {
            DojiShape::Dragonfly
        } else {
            DojiShape::Plain
        };
        return Some(PatternKind::Doji { shape });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::make_ohlcv;

    fn shape_of(candles: &[crate::domain::Candle]) -> Option<DojiShape> {
        match detect(candles, &PatternConfig::default()) {
            Some(PatternKind::Doji { shape }) => Some(shape),
            _ => None,
        }
    }

    #[test]
    fn balanced_doji_is_plain() {
        // body 0.2 on a range of 4, even wicks.
        let candles = make_ohlcv(&[(100.0, 102.0, 98.0, 100.2)]);
        assert_eq!(shape_of(&candles), Some(DojiShape::Plain));
    }

    #[test]
    fn upper_wick_dominance_is_gravestone() {
        let candles = make_ohlcv(&[(100.0, 104.0, 99.0, 100.1)]);
        assert_eq!(shape_of(&candles), Some(DojiShape::Gravestone));
    }

    #[test]
    fn lower_wick_dominance_is_dragonfly() {
        let candles = make_ohlcv(&[(100.0, 101.0, 96.0, 100.1)]);
        assert_eq!(shape_of(&candles), Some(DojiShape::Dragonfly));
    }

    #[test]
    fn large_body_is_not_a_doji() {
        let candles = make_ohlcv(&[(100.0, 102.0, 98.0, 101.5)]);
        assert!(detect(&candles, &PatternConfig::default()).is_none());
    }

    #[test]
    fn zero_range_bar_is_not_detected() {
        let candles = make_ohlcv(&[(100.0, 100.0, 100.0, 100.0)]);
        assert!(detect(&candles, &PatternConfig::default()).is_none());
    }

    #[test]
    fn threshold_is_configurable() {
        // body 0.3 of range: rejected at 0.1, accepted at 0.35.
        let candles = make_ohlcv(&[(100.0, 102.0, 98.0, 101.2)]);
        assert!(detect(&candles, &PatternConfig::default()).is_none());
        let loose = PatternConfig {
            doji_threshold: 0.35,
            ..PatternConfig::default()
        };
        assert!(detect(&candles, &loose).is_some());
    }

    #[test]
    fn empty_series_is_not_detected() {
        assert!(detect(&[], &PatternConfig::default()).is_none());
    }
}
