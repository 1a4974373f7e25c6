//! Liquidity pools and stop sweeps.
//!
//! Stops cluster beyond swing points and at equal highs/lows. The pool map
//! places buy stops above the highest swing high and sell stops below the
//! lowest swing low; a sweep is the last bar punching through one side and
//! closing back inside.

use serde::{Deserialize, Serialize};

use crate::config::SmcConfig;
use crate::domain::{Candle, Direction};

/// Where resting liquidity sits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiquidityMap {
    /// Most recent swing highs, oldest first (up to 5).
    pub swing_highs: Vec<f64>,
    /// Most recent swing lows, oldest first (up to 5).
    pub swing_lows: Vec<f64>,
    /// Midpoints of swing-high pairs within tolerance of each other.
    pub equal_highs: Vec<f64>,
    /// Midpoints of swing-low pairs within tolerance of each other.
    pub equal_lows: Vec<f64>,
    /// The highest swing high, where buy stops rest.
    pub buy_stops: Option<f64>,
    /// The lowest swing low, where sell stops rest.
    pub sell_stops: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepKind {
    BuyStopSweep,
    SellStopSweep,
}

impl std::fmt::Display for SweepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BuyStopSweep => "BUY_STOP_SWEEP",
            Self::SellStopSweep => "SELL_STOP_SWEEP",
        };
        write!(f, "{s}")
    }
}

/// A stop hunt: the last bar pierced a pool and closed back inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquiditySweep {
    pub kind: SweepKind,
    pub level: f64,
    /// The direction price is expected to continue after the sweep.
    pub direction: Direction,
    pub description: String,
}

/// Map the swing-point liquidity pools of the series.
///
/// Swings require strictly higher highs (lower lows) than `swing_strength`
/// neighbors on each side. Equal levels and the stop extremes are taken over
/// all swings; only the reported swing lists are truncated.
pub(super) fn detect_pools(candles: &[Candle], cfg: &SmcConfig) -> LiquidityMap {
    let s = cfg.swing_strength;
    let mut swing_highs = Vec::new();
    let mut swing_lows = Vec::new();

    if candles.len() > 2 * s {
        for i in s..candles.len() - s {
            let c = &candles[i];
            let neighbors = candles[i - s..i].iter().chain(&candles[i + 1..=i + s]);
            let mut higher = true;
            let mut lower = true;
            for n in neighbors {
                higher &= c.high > n.high;
                lower &= c.low < n.low;
            }
            if higher {
                swing_highs.push(c.high);
            }
            if lower {
                swing_lows.push(c.low);
            }
        }
    }

    let equal_highs = find_equal_levels(&swing_highs, cfg.equal_level_tolerance);
    let equal_lows = find_equal_levels(&swing_lows, cfg.equal_level_tolerance);
    let buy_stops = swing_highs.iter().copied().fold(None, |acc: Option<f64>, h| {
        Some(acc.map_or(h, |a| a.max(h)))
    });
    let sell_stops = swing_lows.iter().copied().fold(None, |acc: Option<f64>, l| {
        Some(acc.map_or(l, |a| a.min(l)))
    });

    LiquidityMap {
        swing_highs: tail(swing_highs, 5),
        swing_lows: tail(swing_lows, 5),
        equal_highs,
        equal_lows,
        buy_stops,
        sell_stops,
    }
}

/// Midpoints of every pair of levels within relative `tolerance`.
fn find_equal_levels(levels: &[f64], tolerance: f64) -> Vec<f64> {
    let mut equal = Vec::new();
    for (i, &a) in levels.iter().enumerate() {
        for &b in &levels[i + 1..] {
            if ((a - b) / a).abs() < tolerance {
                equal.push((a + b) / 2.0);
            }
        }
    }
    equal
}

fn tail(mut values: Vec<f64>, keep: usize) -> Vec<f64> {
    if values.len() > keep {
        values.drain(..values.len() - keep);
    }
    values
}

/// Detect a stop sweep on the last bar. Requires both pools to be mapped;
/// the buy side is checked first and at most one sweep is reported.
pub(super) fn detect_sweep(candles: &[Candle], pools: &LiquidityMap) -> Option<LiquiditySweep> {
    let (buy_stops, sell_stops) = (pools.buy_stops?, pools.sell_stops?);
    let last = candles.last()?;

    if last.high > buy_stops && last.close < buy_stops {
        return Some(LiquiditySweep {
            kind: SweepKind::BuyStopSweep,
            level: buy_stops,
            direction: Direction::Bearish,
            description: format!(
                "Liquidity swept above {buy_stops:.2} with rejection: sell signal"
            ),
        });
    }
    if last.low < sell_stops && last.close > sell_stops {
        return Some(LiquiditySweep {
            kind: SweepKind::SellStopSweep,
            level: sell_stops,
            direction: Direction::Bullish,
            description: format!(
                "Liquidity swept below {sell_stops:.2} with reclaim: buy signal"
            ),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{assert_approx, make_ohlcv};

    fn cfg() -> SmcConfig {
        SmcConfig::default()
    }

    /// Flat bars with one clear swing high at 2640 and swing low at 2600.
    fn swing_series() -> Vec<Candle> {
        let mut bars = vec![(2620.0, 2622.0, 2618.0, 2620.0); 3];
        bars.push((2620.0, 2640.0, 2619.0, 2625.0)); // swing high
        bars.extend(vec![(2622.0, 2624.0, 2616.0, 2620.0); 3]);
        bars.push((2620.0, 2621.0, 2600.0, 2615.0)); // swing low
        bars.extend(vec![(2615.0, 2626.0, 2610.0, 2620.0); 3]);
        make_ohlcv(&bars)
    }

    #[test]
    fn swing_points_are_detected() {
        let pools = detect_pools(&swing_series(), &cfg());
        assert_eq!(pools.swing_highs, vec![2640.0]);
        assert_eq!(pools.swing_lows, vec![2600.0]);
        assert_eq!(pools.buy_stops, Some(2640.0));
        assert_eq!(pools.sell_stops, Some(2600.0));
    }

    #[test]
    fn equal_swing_highs_form_a_level() {
        let mut bars = vec![(2620.0, 2622.0, 2618.0, 2620.0); 2];
        bars.push((2620.0, 2640.0, 2619.0, 2625.0));
        bars.extend(vec![(2622.0, 2624.0, 2616.0, 2620.0); 3]);
        bars.push((2620.0, 2640.5, 2619.0, 2626.0)); // within 0.2% of 2640
        bars.extend(vec![(2622.0, 2624.0, 2616.0, 2620.0); 3]);
        let pools = detect_pools(&make_ohlcv(&bars), &cfg());
        assert_eq!(pools.equal_highs.len(), 1);
        assert_approx(pools.equal_highs[0], 2640.25, 1e-9);
        assert_eq!(pools.buy_stops, Some(2640.5));
    }

    #[test]
    fn distant_swing_highs_are_not_equal() {
        let levels = [2640.0, 2660.0];
        assert!(find_equal_levels(&levels, 0.002).is_empty());
    }

    #[test]
    fn flat_series_has_no_swings() {
        let candles = make_ohlcv(&[(2620.0, 2622.0, 2618.0, 2620.0); 12]);
        let pools = detect_pools(&candles, &cfg());
        assert!(pools.swing_highs.is_empty());
        assert!(pools.buy_stops.is_none());
        assert!(pools.sell_stops.is_none());
    }

    #[test]
    fn buy_stop_sweep_is_bearish() {
        let mut candles = swing_series();
        // Pierce 2640 and close back below it.
        candles.push(make_ohlcv(&[(2625.0, 2645.0, 2624.0, 2630.0)]).remove(0));
        let pools = detect_pools(&candles, &cfg());
        // Appending does not disturb the old swings.
        assert_eq!(pools.buy_stops, Some(2640.0));
        let sweep = detect_sweep(&candles, &pools).unwrap();
        assert_eq!(sweep.kind, SweepKind::BuyStopSweep);
        assert_eq!(sweep.direction, Direction::Bearish);
        assert_approx(sweep.level, 2640.0, 1e-9);
    }

    #[test]
    fn sell_stop_sweep_is_bullish() {
        let mut candles = swing_series();
        candles.push(make_ohlcv(&[(2615.0, 2616.0, 2595.0, 2610.0)]).remove(0));
        let pools = detect_pools(&candles, &cfg());
        let sweep = detect_sweep(&candles, &pools).unwrap();
        assert_eq!(sweep.kind, SweepKind::SellStopSweep);
        assert_eq!(sweep.direction, Direction::Bullish);
    }

    #[test]
    fn close_beyond_the_pool_is_a_breakout_not_a_sweep() {
        let mut candles = swing_series();
        candles.push(make_ohlcv(&[(2625.0, 2650.0, 2624.0, 2648.0)]).remove(0));
        let pools = detect_pools(&candles, &cfg());
        assert!(detect_sweep(&candles, &pools).is_none());
    }

    #[test]
    fn sweep_needs_both_pools_mapped() {
        let candles = make_ohlcv(&[(2620.0, 2622.0, 2618.0, 2620.0); 12]);
        let pools = detect_pools(&candles, &cfg());
        assert!(detect_sweep(&candles, &pools).is_none());
    }
}
