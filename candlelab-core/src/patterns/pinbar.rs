//! Pinbar (hammer / shooting star) detection.
//!
//! A pinbar has a small body and one wick at least `tail_ratio` times the
//! body, with the opposite wick smaller than the body. The body is floored
//! at a small epsilon so degenerate bars cannot divide by zero.

use crate::config::PatternConfig;
use crate::domain::{Candle, Direction};

use super::PatternKind;

/// Detect a pinbar on the last candle of the series.
pub fn detect(candles: &[Candle], cfg: &PatternConfig) -> Option<PatternKind> {
    let last = candles.last()?;

    let body = last.body().max(cfg.body_epsilon);
    let upper_wick = last.upper_wick();
    let lower_wick = last.lower_wick();

    // Hammer: long lower tail, small upper wick.
    if lower_wick / body >= cfg.pinbar_tail_ratio && upper_wick < body {
        return Some(PatternKind::Pinbar {
            direction: Direction::Bullish,
            strength: (lower_wick / body / cfg.pinbar_tail_ratio * 100.0).min(100.0),
        });
    }

    // Shooting star: the mirror.
    if upper_wick / body >= cfg.pinbar_tail_ratio && lower_wick < body {
        return Some(PatternKind::Pinbar {
            direction: Direction::Bearish,
            strength: (upper_wick / body / cfg.pinbar_tail_ratio * 100.0).min(100.0),
        });
    }

    None
}
