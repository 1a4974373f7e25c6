//! Shared helpers for in-module tests.

use crate::domain::Candle;
use chrono::{Duration, TimeZone, Utc};

/// Create synthetic candles from close prices.
///
/// Generates plausible OHLV: open = prev close (or close for the first bar),
/// high = max(open,close) + 1.0, low = min(open,close) − 1.0, volume = 1000.
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                timestamp: base + Duration::minutes(15 * i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Create candles from explicit (open, high, low, close) tuples, volume = 1000.
pub fn make_ohlcv(bars: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    bars.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Candle {
            timestamp: base + Duration::minutes(15 * i as i64),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Mirror a series around a pivot price: every price p becomes 2*pivot − p.
///
/// Turns bullish structures into their bearish mirror images, preserving all
/// relative distances. Used by the symmetry tests.
pub fn invert_prices(candles: &[Candle], pivot: f64) -> Vec<Candle> {
    candles
        .iter()
        .map(|c| Candle {
            timestamp: c.timestamp,
            open: 2.0 * pivot - c.open,
            high: 2.0 * pivot - c.low,
            low: 2.0 * pivot - c.high,
            close: 2.0 * pivot - c.close,
            volume: c.volume,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}
