//! Phase classification over the trailing phase window.

use crate::config::WyckoffConfig;
use crate::domain::Candle;

use super::Phase;

/// Classify the trailing `phase_window` bars.
///
/// A tight range (size below `range_threshold` of the mean close) is read as
/// accumulation or distribution depending on which half of the range the
/// last close sits in. Outside a range, the window return decides trend.
pub(super) fn classify(candles: &[Candle], cfg: &WyckoffConfig) -> Phase {
    let window = &candles[candles.len().saturating_sub(cfg.phase_window)..];
    if window.is_empty() {
        return Phase::Unknown;
    }

    let high = window.iter().map(|c| c.high).fold(f64::MIN, f64::max);
    let low = window.iter().map(|c| c.low).fold(f64::MAX, f64::min);
    let mean_close = window.iter().map(|c| c.close).sum::<f64>() / window.len() as f64;
    if mean_close <= 0.0 {
        return Phase::Unknown;
    }

    let last_close = window[window.len() - 1].close;
    let range_size = (high - low) / mean_close;

    if range_size < cfg.range_threshold {
        let midpoint = (high + low) / 2.0;
        return if last_close > midpoint {
            Phase::Accumulation
        } else {
            Phase::Distribution
        };
    }

    let first_close = window[0].close;
    if first_close == 0.0 {
        return Phase::Unknown;
    }
    let window_return = (last_close - first_close) / first_close;
    if window_return > cfg.trend_threshold {
        Phase::Markup
    } else if window_return < -cfg.trend_threshold {
        Phase::Markdown
    } else {
        Phase::Unknown
    }
}
