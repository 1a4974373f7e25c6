//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Warmup: the first `period` values are NaN.

use crate::domain::Candle;

/// Compute the RSI series over candle closes.
pub fn rsi(candles: &[Candle], period: usize) -> Vec<f64> {
    let n = candles.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    // Close-to-close changes; changes[0] is undefined.
    let mut changes = vec![f64::NAN; n];
    for i in 1..n {
        changes[i] = candles[i].close - candles[i - 1].close;
    }

    // Seed: average gain and average loss over the first `period` changes.
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for &ch in &changes[1..=period] {
        if ch.is_nan() {
            return result;
        }
        if ch > 0.0 {
            avg_gain += ch;
        } else {
            avg_loss -= ch;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    result[period] = rsi_value(avg_gain, avg_loss);

    // Wilder smoothing for subsequent values.
    let alpha = 1.0 / period as f64;
    for i in (period + 1)..n {
        let ch = changes[i];
        if ch.is_nan() {
            return result;
        }
        let gain = if ch > 0.0 { ch } else { 0.0 };
        let loss = if ch < 0.0 { -ch } else { 0.0 };

        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;

        result[i] = rsi_value(avg_gain, avg_loss);
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
