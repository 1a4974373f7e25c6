//! End-to-end scenario tests against the public API.
//!
//! Scenarios:
//! 1. Spring: false breakdown below range support resolves to a BUY signal
//! 2. Bullish engulfing detected at fixed strength 85
//! 3. Bullish FVG zone with exact bottom/top levels
//! 4. Insufficient data degrades, never panics
//! 5. Buy-stop liquidity sweep resolves to a SELL signal at confidence 80
//! 6. A filled FVG stays gone as the series keeps extending

use chrono::{Duration, TimeZone, Utc};

use candlelab_core::config::AnalysisConfig;
use candlelab_core::domain::{Candle, Direction};
use candlelab_core::engine::MarketAnalyzer;
use candlelab_core::patterns::{PatternKind, PatternReport};
use candlelab_core::signal::Action;
use candlelab_core::smc::{SmcAnalyzer, SweepKind, ZoneKind};
use candlelab_core::wyckoff::{EventKind, Phase, WyckoffAnalyzer};

// ── Helpers ──────────────────────────────────────────────────────────

fn candles(bars: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
    candles_with_volume(bars, 1000.0)
}

fn candles_with_volume(bars: &[(f64, f64, f64, f64)], volume: f64) -> Vec<Candle> {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    bars.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Candle {
            timestamp: base + Duration::minutes(15 * i as i64),
            open,
            high,
            low,
            close,
            volume,
        })
        .collect()
}

// ── 1. Spring ────────────────────────────────────────────────────────

#[test]
fn spring_below_range_support_signals_buy() {
    // 40 flat bars holding support at 2610, then a bar dipping to 2605 and
    // recovering to close at 2622 on 1.5x volume.
    let mut bars = vec![(2618.0, 2622.0, 2610.0, 2620.0); 40];
    bars.push((2619.0, 2623.0, 2605.0, 2622.0));
    let mut series = candles(&bars);
    series.last_mut().unwrap().volume = 1500.0;

    let result = WyckoffAnalyzer::new(AnalysisConfig::default().wyckoff).analyze(&series);

    let spring = result
        .events
        .iter()
        .find(|e| e.kind == EventKind::Spring)
        .expect("spring event");
    assert!(spring.confidence >= 70.0 && spring.confidence <= 95.0);
    assert!(spring.volume_confirmed);
    assert_eq!(spring.price_level, 2610.0);

    let signal = result.signal.expect("signal");
    assert_eq!(signal.action, Action::Buy);
    assert_eq!(signal.trigger.as_deref(), Some("SPRING"));
}

// ── 2. Bullish engulfing ─────────────────────────────────────────────

#[test]
fn bullish_engulfing_has_fixed_strength() {
    let series = candles(&[
        (2030.0, 2031.0, 2024.5, 2025.0),
        (2024.0, 2031.5, 2023.5, 2030.5),
    ]);
    let report = PatternReport::scan(&series, &AnalysisConfig::default().patterns);
    let engulfing = report
        .patterns
        .iter()
        .find_map(|p| match p {
            PatternKind::Engulfing {
                direction,
                strength,
            } => Some((*direction, *strength)),
            _ => None,
        })
        .expect("engulfing pattern");
    assert_eq!(engulfing.0, Direction::Bullish);
    assert_eq!(engulfing.1, 85.0);
    assert!(report
        .patterns
        .iter()
        .any(|p| p.label() == "BULLISH_ENGULFING"));
}

// ── 3. Bullish FVG ───────────────────────────────────────────────────

#[test]
fn bullish_fvg_zone_has_exact_levels() {
    let mut bars = vec![(2616.0, 2620.0, 2614.0, 2619.0); 10];
    bars.push((2620.0, 2624.0, 2619.0, 2623.0));
    bars.push((2626.0, 2630.0, 2625.0, 2629.0));
    let series = candles(&bars);

    let result = SmcAnalyzer::new(AnalysisConfig::default().smc).analyze(&series);
    let zone = result.fvgs.last().expect("fvg zone");
    assert_eq!(zone.kind, ZoneKind::FairValueGap);
    assert_eq!(zone.direction, Direction::Bullish);
    assert_eq!(zone.bottom, 2620.0);
    assert_eq!(zone.top, 2625.0);
    assert!(!zone.mitigated);
}

// ── 4. Insufficient data ─────────────────────────────────────────────

#[test]
fn five_bars_degrade_across_all_analyzers() {
    let series = candles(&[
        (2620.0, 2622.0, 2618.0, 2621.0),
        (2621.0, 2623.0, 2619.0, 2620.0),
        (2620.0, 2621.0, 2617.0, 2618.0),
        (2618.0, 2622.0, 2617.5, 2621.0),
        (2621.0, 2624.0, 2620.0, 2623.0),
    ]);

    let bundle = MarketAnalyzer::new(AnalysisConfig::default()).analyze(&series);

    assert_eq!(bundle.wyckoff.phase, Phase::Unknown);
    assert!(bundle.wyckoff.events.is_empty());
    assert!(bundle.wyckoff.signal.is_none());
    assert!(bundle.smc.signal.is_none());
    assert!(bundle.indicators.rsi.is_none());
    assert!(bundle.indicators.atr.is_none());
}

// ── 5. Liquidity sweep ───────────────────────────────────────────────

#[test]
fn buy_stop_sweep_signals_sell_at_80() {
    let mut bars = vec![(2640.0, 2642.0, 2638.0, 2641.0); 3];
    bars.push((2641.0, 2650.0, 2640.0, 2645.0)); // swing high: buy stops at 2650
    bars.extend(vec![(2642.0, 2644.0, 2636.0, 2640.0); 3]);
    bars.push((2640.0, 2641.0, 2630.0, 2638.0)); // swing low: sell stops at 2630
    bars.extend(vec![(2638.0, 2646.0, 2634.0, 2642.0); 3]);
    bars.push((2644.0, 2655.0, 2643.0, 2648.0)); // pierce 2650, close back below
    let series = candles(&bars);

    let result = SmcAnalyzer::new(AnalysisConfig::default().smc).analyze(&series);

    let sweep = result.sweep.expect("sweep");
    assert_eq!(sweep.kind, SweepKind::BuyStopSweep);
    assert_eq!(sweep.direction, Direction::Bearish);
    assert_eq!(sweep.level, 2650.0);

    let signal = result.signal.expect("signal");
    assert_eq!(signal.action, Action::Sell);
    assert_eq!(signal.confidence, 80.0);
    assert_eq!(signal.trigger.as_deref(), Some("LIQUIDITY_SWEEP"));
}

// ── 6. Mitigation under extension ────────────────────────────────────

#[test]
fn filled_fvg_never_resurrects() {
    let mut bars = vec![(2616.0, 2620.0, 2614.0, 2619.0); 10];
    bars.push((2620.0, 2624.0, 2619.0, 2623.0));
    bars.push((2626.0, 2630.0, 2625.0, 2629.0));

    let analyzer = SmcAnalyzer::new(AnalysisConfig::default().smc);

    let has_gap = |bars: &[(f64, f64, f64, f64)]| {
        analyzer
            .analyze(&candles(bars))
            .fvgs
            .iter()
            .any(|z| z.bottom == 2620.0 && z.top == 2625.0)
    };
    assert!(has_gap(&bars));

    // A pullback dips into the zone and fills it.
    bars.push((2629.0, 2631.0, 2622.0, 2630.0));
    assert!(!has_gap(&bars));

    // Further bars that never revisit the zone cannot bring it back.
    bars.push((2630.0, 2634.0, 2628.0, 2633.0));
    bars.push((2633.0, 2636.0, 2631.0, 2635.0));
    assert!(!has_gap(&bars));
}
