//! Market structure from swing-point sequencing.
//!
//! Unlike the liquidity pools, structure swings tolerate ties: a bar whose
//! high equals the window maximum still anchors structure. The trend reads
//! the last two swing pairs: higher highs plus higher lows is bullish, lower
//! plus lower bearish, anything mixed is ranging.

use serde::{Deserialize, Serialize};

use crate::domain::Candle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendState {
    Bullish,
    Bearish,
    Ranging,
    Unknown,
}

impl std::fmt::Display for TrendState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Bullish => "BULLISH",
            Self::Bearish => "BEARISH",
            Self::Ranging => "RANGING",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

/// The swing-structure read of the series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketStructure {
    pub trend: TrendState,
    pub last_high: Option<f64>,
    pub last_low: Option<f64>,
    pub higher_highs: bool,
    pub higher_lows: bool,
}

impl MarketStructure {
    fn unknown() -> Self {
        Self {
            trend: TrendState::Unknown,
            last_high: None,
            last_low: None,
            higher_highs: false,
            higher_lows: false,
        }
    }
}

/// Read structure from the last two swing highs and lows.
pub(super) fn analyze(candles: &[Candle]) -> MarketStructure {
    if candles.len() < 10 {
        return MarketStructure::unknown();
    }

    let mut swing_highs: Vec<f64> = Vec::new();
    let mut swing_lows: Vec<f64> = Vec::new();
    for i in 2..candles.len() - 2 {
        let window = &candles[i - 2..=i + 2];
        let high = candles[i].high;
        let low = candles[i].low;
        if window.iter().all(|c| c.high <= high) {
            swing_highs.push(high);
        }
        if window.iter().all(|c| c.low >= low) {
            swing_lows.push(low);
        }
    }

    if swing_highs.len() < 2 || swing_lows.len() < 2 {
        return MarketStructure::unknown();
    }

    let last_high = swing_highs[swing_highs.len() - 1];
    let prev_high = swing_highs[swing_highs.len() - 2];
    let last_low = swing_lows[swing_lows.len() - 1];
    let prev_low = swing_lows[swing_lows.len() - 2];

    let higher_highs = last_high > prev_high;
    let higher_lows = last_low > prev_low;
    let trend = if higher_highs && higher_lows {
        TrendState::Bullish
    } else if last_high < prev_high && last_low < prev_low {
        TrendState::Bearish
    } else {
        TrendState::Ranging
    };

    MarketStructure {
        trend,
        last_high: Some(last_high),
        last_low: Some(last_low),
        higher_highs,
        higher_lows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{invert_prices, make_ohlcv};

    /// Two spaced swing highs/lows with the given peak and trough levels.
    fn zigzag(peaks: [f64; 2], troughs: [f64; 2]) -> Vec<Candle> {
        let mut bars = vec![(2620.0, 2621.0, 2619.0, 2620.0); 2];
        bars.push((2620.0, peaks[0], 2620.0, 2622.0));
        bars.extend(vec![(2621.0, 2622.0, 2620.0, 2621.0); 2]);
        bars.push((2621.0, 2621.5, troughs[0], 2620.5));
        bars.extend(vec![(2620.0, 2621.5, 2619.5, 2620.5); 2]);
        bars.push((2620.0, peaks[1], 2620.0, 2623.0));
        bars.extend(vec![(2621.0, 2622.0, 2620.0, 2621.0); 2]);
        bars.push((2621.0, 2621.5, troughs[1], 2620.5));
        bars.extend(vec![(2620.0, 2621.0, 2619.5, 2620.5); 2]);
        make_ohlcv(&bars)
    }

    #[test]
    fn higher_highs_and_lows_are_bullish() {
        let structure = analyze(&zigzag([2630.0, 2635.0], [2610.0, 2613.0]));
        assert_eq!(structure.trend, TrendState::Bullish);
        assert_eq!(structure.last_high, Some(2635.0));
        assert_eq!(structure.last_low, Some(2613.0));
        assert!(structure.higher_highs);
        assert!(structure.higher_lows);
    }

    #[test]
    fn mirrored_bullish_structure_is_bearish() {
        let candles = invert_prices(&zigzag([2630.0, 2635.0], [2610.0, 2613.0]), 2620.0);
        assert_eq!(analyze(&candles).trend, TrendState::Bearish);
    }

    #[test]
    fn mixed_swings_are_ranging() {
        // Higher high but lower low.
        let structure = analyze(&zigzag([2630.0, 2635.0], [2613.0, 2610.0]));
        assert_eq!(structure.trend, TrendState::Ranging);
        assert!(structure.higher_highs);
        assert!(!structure.higher_lows);
    }

    #[test]
    fn short_series_is_unknown() {
        let candles = make_ohlcv(&[(2620.0, 2621.0, 2619.0, 2620.0); 9]);
        let structure = analyze(&candles);
        assert_eq!(structure.trend, TrendState::Unknown);
        assert!(structure.last_high.is_none());
    }

    #[test]
    fn flat_series_has_ubiquitous_tied_swings() {
        // Every interior bar ties the window max and min, so structure sees
        // equal swings and reads Ranging rather than Unknown.
        let candles = make_ohlcv(&[(2620.0, 2621.0, 2619.0, 2620.0); 12]);
        let structure = analyze(&candles);
        assert_eq!(structure.trend, TrendState::Ranging);
    }
}
