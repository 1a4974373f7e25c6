//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR here is the rolling mean of True Range over the period, the simple
//! variant, not Wilder smoothing.

use crate::domain::Candle;

/// Compute the True Range series.
///
/// TR[0] is NaN: with no previous close the first bar has no proper true
/// range, which keeps the ATR warmup consistent at `period` bars.
pub fn true_range(candles: &[Candle]) -> Vec<f64> {
    let n = candles.len();
    let mut tr = vec![f64::NAN; n];
    for i in 1..n {
        let h = candles[i].high;
        let l = candles[i].low;
        let pc = candles[i - 1].close;
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }
    tr
}

/// Compute the ATR series as the rolling mean of True Range.
pub fn atr(candles: &[Candle], period: usize) -> Vec<f64> {
    let tr = true_range(candles);
    let n = tr.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    // TR is defined from index 1, so the first full window ends at `period`.
    let mut sum: f64 = tr[1..=period].iter().sum();
    result[period] = sum / period as f64;
    for i in (period + 1)..n {
        sum += tr[i] - tr[i - period];
        result[i] = sum / period as f64;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{assert_approx, make_ohlcv};

    const EPS: f64 = 1e-10;

    #[test]
    fn true_range_basic() {
        let candles = make_ohlcv(&[
            (100.0, 105.0, 95.0, 102.0),  // TR undefined (first bar)
            (102.0, 108.0, 100.0, 106.0), // TR = max(8, |108-102|, |100-102|) = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = max(9, |107-106|, |98-106|) = 9
        ]);
        let tr = true_range(&candles);
        assert!(tr[0].is_nan());
        assert_approx(tr[1], 8.0, EPS);
        assert_approx(tr[2], 9.0, EPS);
    }

    #[test]
    fn true_range_gap_up() {
        // Gap up: prev close 100, current bar 110-115-108.
        let candles = make_ohlcv(&[
            (98.0, 102.0, 97.0, 100.0),
            (110.0, 115.0, 108.0, 112.0), // TR = max(7, |115-100|, |108-100|) = 15
        ]);
        let tr = true_range(&candles);
        assert_approx(tr[1], 15.0, EPS);
    }

    #[test]
    fn atr_is_rolling_mean_of_tr() {
        let candles = make_ohlcv(&[
            (100.0, 105.0, 95.0, 102.0),  // TR NaN
            (102.0, 108.0, 100.0, 106.0), // TR = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = 9
            (99.0, 103.0, 97.0, 101.0),   // TR = 6
            (101.0, 106.0, 100.0, 105.0), // TR = 5
        ]);
        let result = atr(&candles, 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], (8.0 + 9.0 + 6.0) / 3.0, EPS);
        assert_approx(result[4], (9.0 + 6.0 + 5.0) / 3.0, EPS);
    }

    #[test]
    fn atr_short_series_is_all_nan() {
        let candles = make_ohlcv(&[(100.0, 105.0, 95.0, 102.0), (102.0, 108.0, 100.0, 106.0)]);
        assert!(atr(&candles, 14).iter().all(|v| v.is_nan()));
    }
}
