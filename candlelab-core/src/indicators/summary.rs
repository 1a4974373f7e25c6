//! Latest-value indicator snapshot with trend and RSI-zone labels.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::IndicatorConfig;
use crate::domain::{Candle, Direction};

use super::{atr, ema, last_finite, rsi};

/// RSI zone relative to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl std::fmt::Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "overbought"),
            Self::Oversold => write!(f, "oversold"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Latest indicator values for a series.
///
/// Each field is `None` when the series is shorter than the indicator's
/// warmup; the summary never fails outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSummary {
    pub rsi: Option<f64>,
    pub rsi_zone: Option<RsiZone>,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    /// "bullish" when EMA(fast) > EMA(slow), else "bearish"; `None` while
    /// either EMA is warming up.
    pub trend: Option<Direction>,
    pub atr: Option<f64>,
}

impl IndicatorSummary {
    pub fn compute(candles: &[Candle], cfg: &IndicatorConfig) -> Self {
        let rsi_last = last_finite(&rsi(candles, cfg.rsi_period));
        let ema_fast = last_finite(&ema(candles, cfg.ema_fast));
        let ema_slow = last_finite(&ema(candles, cfg.ema_slow));
        let atr_last = last_finite(&atr(candles, cfg.atr_period));

        let rsi_zone = rsi_last.map(|v| {
            if v >= cfg.rsi_overbought {
                RsiZone::Overbought
            } else if v <= cfg.rsi_oversold {
                RsiZone::Oversold
            } else {
                RsiZone::Neutral
            }
        });

        let trend = match (ema_fast, ema_slow) {
            (Some(fast), Some(slow)) => Some(if fast > slow {
                Direction::Bullish
            } else {
                Direction::Bearish
            }),
            _ => None,
        };

        debug!(bars = candles.len(), rsi = ?rsi_last, ?trend, "indicator summary computed");

        Self {
            rsi: rsi_last,
            rsi_zone,
            ema_fast,
            ema_slow,
            trend,
            atr: atr_last,
        }
    }

    /// Render the summary as text lines for the arbitration context.
    pub fn render(&self) -> String {
        fn fmt_opt(v: Option<f64>) -> String {
            match v {
                Some(v) => format!("{v:.2}"),
                None => "n/a (insufficient history)".to_string(),
            }
        }

        let rsi_line = match (self.rsi, self.rsi_zone) {
            (Some(v), Some(zone)) => format!("RSI: {v:.2} ({zone})"),
            _ => "RSI: n/a (insufficient history)".to_string(),
        };
        let trend_line = match self.trend {
            Some(Direction::Bullish) => "Trend (EMA fast vs slow): bullish",
            Some(Direction::Bearish) => "Trend (EMA fast vs slow): bearish",
            None => "Trend (EMA fast vs slow): n/a",
        };

        format!(
            "{rsi_line}\nEMA fast: {}\nEMA slow: {}\n{trend_line}\nATR: {}",
            fmt_opt(self.ema_fast),
            fmt_opt(self.ema_slow),
            fmt_opt(self.atr),
        )
    }
}
