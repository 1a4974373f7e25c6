//! Series preprocessing: derived per-bar columns shared by the analyzers.
//!
//! Rolling outputs model the warmup edge explicitly: the first W−1 entries
//! are `None` rather than NaN, so "insufficient history" is a type-checked
//! condition instead of floating-point contagion. Point-wise columns
//! (spread, body, wicks) are defined for every bar.

use crate::domain::Candle;

/// Window for the rolling volume/spread means.
pub const ROLLING_WINDOW: usize = 20;
/// Window for the centered swing high/low extrema.
pub const SWING_WINDOW: usize = 5;

/// Derived per-bar statistics for a candle series.
///
/// Pure function of the input; holds no reference to it.
#[derive(Debug, Clone)]
pub struct SeriesStats {
    /// Rolling mean of volume, window [`ROLLING_WINDOW`].
    pub vol_sma: Vec<Option<f64>>,
    /// volume / vol_sma, defined where vol_sma is.
    pub rel_volume: Vec<Option<f64>>,
    /// high − low per bar.
    pub spread: Vec<f64>,
    /// Rolling mean of spread, window [`ROLLING_WINDOW`].
    pub spread_sma: Vec<Option<f64>>,
    /// |close − open| per bar.
    pub body: Vec<f64>,
    pub upper_wick: Vec<f64>,
    pub lower_wick: Vec<f64>,
    /// Centered rolling max of high, window [`SWING_WINDOW`].
    pub swing_high: Vec<Option<f64>>,
    /// Centered rolling min of low, window [`SWING_WINDOW`].
    pub swing_low: Vec<Option<f64>>,
    /// Whole-series mean volume.
    pub mean_volume: f64,
    /// Whole-series mean spread.
    pub mean_spread: f64,
    /// Mean absolute close-to-close change (0 when fewer than 2 bars).
    pub mean_abs_close_change: f64,
}

impl SeriesStats {
    /// Compute stats with the default windows.
    pub fn compute(candles: &[Candle]) -> Self {
        Self::compute_with(candles, ROLLING_WINDOW, SWING_WINDOW)
    }

    /// Compute stats with explicit windows (used by tests and tuning).
    pub fn compute_with(candles: &[Candle], window: usize, swing_window: usize) -> Self {
        let n = candles.len();
        let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
        let spread: Vec<f64> = candles.iter().map(|c| c.spread()).collect();
        let body: Vec<f64> = candles.iter().map(|c| c.body()).collect();
        let upper_wick: Vec<f64> = candles.iter().map(|c| c.upper_wick()).collect();
        let lower_wick: Vec<f64> = candles.iter().map(|c| c.lower_wick()).collect();
        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

        let vol_sma = rolling_mean(&volumes, window);
        let spread_sma = rolling_mean(&spread, window);

        let rel_volume = volumes
            .iter()
            .zip(&vol_sma)
            .map(|(&v, sma)| match sma {
                Some(s) if *s > 0.0 => Some(v / s),
                _ => None,
            })
            .collect();

        let swing_high = centered_rolling(&highs, swing_window, f64::max);
        let swing_low = centered_rolling(&lows, swing_window, f64::min);

        let mean_volume = mean(&volumes);
        let mean_spread = mean(&spread);
        let mean_abs_close_change = if n < 2 {
            0.0
        } else {
            candles
                .windows(2)
                .map(|w| (w[1].close - w[0].close).abs())
                .sum::<f64>()
                / (n - 1) as f64
        };

        Self {
            vol_sma,
            rel_volume,
            spread,
            spread_sma,
            body,
            upper_wick,
            lower_wick,
            swing_high,
            swing_low,
            mean_volume,
            mean_spread,
            mean_abs_close_change,
        }
    }

    /// Last rolling volume mean, if the series is long enough.
    pub fn last_vol_sma(&self) -> Option<f64> {
        self.vol_sma.last().copied().flatten()
    }

    /// Last rolling spread mean, if the series is long enough.
    pub fn last_spread_sma(&self) -> Option<f64> {
        self.spread_sma.last().copied().flatten()
    }
}

/// Trailing rolling mean: entry i is the mean of the `window` values ending
/// at i, `None` for the first window−1 entries.
fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if window == 0 || n < window {
        return out;
    }
    let mut sum: f64 = values[..window].iter().sum();
    out[window - 1] = Some(sum / window as f64);
    for i in window..n {
        sum += values[i] - values[i - window];
        out[i] = Some(sum / window as f64);
    }
    out
}

/// Centered rolling fold (max or min): entry i covers values[i-h ..= i+h]
/// where h = window/2, `None` at the edges where the window does not fit.
fn centered_rolling(values: &[f64], window: usize, fold: fn(f64, f64) -> f64) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if window == 0 || n < window {
        return out;
    }
    let half = window / 2;
    for i in half..n - half {
        let slice = &values[i - half..=i + half];
        let acc = slice.iter().copied().reduce(fold);
        out[i] = acc;
    }
    out
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
