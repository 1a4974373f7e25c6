//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1],
//! alpha = 2 / (period + 1).
//! Seed: EMA[period-1] = SMA of the first `period` close values.

use crate::domain::Candle;

/// Compute the EMA series over candle closes.
pub fn ema(candles: &[Candle], period: usize) -> Vec<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    ema_of_series(&closes, period)
}

/// Compute raw EMA values from a pre-extracted f64 slice.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    // Seed: SMA of the first `period` values.
    let mut sum = 0.0;
    for &v in values.iter().take(period) {
        if v.is_nan() {
            return result;
        }
        sum += v;
    }
    let seed = sum / period as f64;
    result[period - 1] = seed;

    let mut prev = seed;
    for i in period..n {
        if values[i].is_nan() {
            return result;
        }
        let val = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = val;
        prev = val;
    }

    result
}
