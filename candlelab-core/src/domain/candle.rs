//! Candle: the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar of market data.
///
/// Candles form a time-ordered sequence, oldest first; analyzers treat the
/// final element as "now". Volume is a plain f64 because some feeds report
/// fractional contract volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Direction of a candle, zone, or detected structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
}

impl Direction {
    /// The mirror-image direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Bullish => Self::Bearish,
            Self::Bearish => Self::Bullish,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "BULLISH"),
            Self::Bearish => write!(f, "BEARISH"),
        }
    }
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Absolute size of the candle body.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Top of the body range (max of open/close).
    pub fn body_high(&self) -> f64 {
        self.open.max(self.close)
    }

    /// Bottom of the body range (min of open/close).
    pub fn body_low(&self) -> f64 {
        self.open.min(self.close)
    }

    /// Wick above the body.
    pub fn upper_wick(&self) -> f64 {
        self.high - self.body_high()
    }

    /// Wick below the body.
    pub fn lower_wick(&self) -> f64 {
        self.body_low() - self.low
    }

    /// Full high-to-low range.
    pub fn spread(&self) -> f64 {
        self.high - self.low
    }

    /// Basic OHLC sanity check: high is the highest price, low the lowest.
    ///
    /// Analyzers do not reject insane bars; they treat them as
    /// zero-information. This check exists for the ingestion boundary and
    /// for tests.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}
