//! Smart Money Concepts analysis: zones, liquidity, structure.
//!
//! One pass over the series produces the active fair value gaps and order
//! blocks, the liquidity pool map, the swing-structure trend and at most one
//! stop sweep, then folds them into a single signal.

mod liquidity;
mod structure;
mod zones;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SmcConfig;
use crate::domain::{Candle, Direction};
use crate::preprocess::SeriesStats;
use crate::signal::{Action, Signal};

pub use liquidity::{LiquidityMap, LiquiditySweep, SweepKind};
pub use structure::{MarketStructure, TrendState};
pub use zones::{Zone, ZoneKind};

const SWEEP_CONFIDENCE: f64 = 80.0;
const FVG_CONFIDENCE: f64 = 65.0;
const ORDER_BLOCK_CONFIDENCE: f64 = 70.0;

/// Complete output of one SMC analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmcResult {
    /// Active fair value gaps, oldest first.
    pub fvgs: Vec<Zone>,
    /// Active order blocks, oldest first.
    pub order_blocks: Vec<Zone>,
    pub liquidity: LiquidityMap,
    pub structure: MarketStructure,
    pub sweep: Option<LiquiditySweep>,
    /// `None` when the series was too short to analyze.
    pub signal: Option<Signal>,
}

impl SmcResult {
    fn insufficient() -> Self {
        Self {
            fvgs: Vec::new(),
            order_blocks: Vec::new(),
            liquidity: LiquidityMap::default(),
            structure: structure::analyze(&[]),
            sweep: None,
            signal: None,
        }
    }

    /// Render the result as text lines for the arbitration context.
    pub fn render(&self) -> String {
        let mut lines = vec![format!("Structure: {}", self.structure.trend)];
        for zone in &self.fvgs {
            lines.push(format!(
                "FVG {}: {:.2}–{:.2} (strength {:.0})",
                zone.direction, zone.bottom, zone.top, zone.strength
            ));
        }
        for zone in &self.order_blocks {
            lines.push(format!(
                "Order block {}: {:.2}–{:.2} (strength {:.0})",
                zone.direction, zone.bottom, zone.top, zone.strength
            ));
        }
        if let Some(level) = self.liquidity.buy_stops {
            lines.push(format!("Buy stops above {level:.2}"));
        }
        if let Some(level) = self.liquidity.sell_stops {
            lines.push(format!("Sell stops below {level:.2}"));
        }
        if let Some(sweep) = &self.sweep {
            lines.push(format!("Sweep: {} at {:.2}", sweep.kind, sweep.level));
        }
        if let Some(signal) = &self.signal {
            lines.push(format!(
                "Signal: {} (confidence {:.0}) — {}",
                signal.action, signal.confidence, signal.reason
            ));
        }
        lines.join("\n")
    }
}

/// Zone, liquidity and structure detection over a candle series.
#[derive(Debug, Clone)]
pub struct SmcAnalyzer {
    cfg: SmcConfig,
}

impl SmcAnalyzer {
    pub fn new(cfg: SmcConfig) -> Self {
        Self { cfg }
    }

    /// Analyze the series. Pure and deterministic.
    pub fn analyze(&self, candles: &[Candle]) -> SmcResult {
        let cfg = &self.cfg;
        if candles.len() < cfg.min_bars {
            debug!(bars = candles.len(), min = cfg.min_bars, "smc: insufficient data");
            return SmcResult::insufficient();
        }

        let stats = SeriesStats::compute(candles);
        let fvgs = zones::detect_fvgs(candles, &stats, cfg);
        let order_blocks = zones::detect_order_blocks(candles, &stats, cfg);
        let liquidity = liquidity::detect_pools(candles, cfg);
        let structure = structure::analyze(candles);
        let sweep = liquidity::detect_sweep(candles, &liquidity);

        let signal = synthesize_signal(
            candles[candles.len() - 1].close,
            &fvgs,
            &order_blocks,
            sweep.as_ref(),
        );

        debug!(
            trend = %structure.trend,
            fvgs = fvgs.len(),
            order_blocks = order_blocks.len(),
            sweep = sweep.is_some(),
            action = %signal.action,
            "smc analysis complete"
        );

        SmcResult {
            fvgs,
            order_blocks,
            liquidity,
            structure,
            sweep,
            signal: Some(signal),
        }
    }
}

/// Priority synthesis: sweep, then price inside an FVG, then price inside an
/// order block. The first hit wins even when a later setup carries a higher
/// confidence.
fn synthesize_signal(
    current_price: f64,
    fvgs: &[Zone],
    order_blocks: &[Zone],
    sweep: Option<&LiquiditySweep>,
) -> Signal {
    if let Some(sweep) = sweep {
        let action = match sweep.direction {
            Direction::Bullish => Action::Buy,
            Direction::Bearish => Action::Sell,
        };
        return Signal::directional(
            action,
            SWEEP_CONFIDENCE,
            sweep.description.clone(),
            "LIQUIDITY_SWEEP",
        );
    }

    for zone in fvgs {
        if zone.contains(current_price) {
            let action = match zone.direction {
                Direction::Bullish => Action::Buy,
                Direction::Bearish => Action::Sell,
            };
            return Signal::directional(
                action,
                FVG_CONFIDENCE,
                format!("Price inside a {} fair value gap", zone.direction),
                "FVG",
            );
        }
    }

    for zone in order_blocks {
        if zone.contains(current_price) {
            let action = match zone.direction {
                Direction::Bullish => Action::Buy,
                Direction::Bearish => Action::Sell,
            };
            return Signal::directional(
                action,
                ORDER_BLOCK_CONFIDENCE,
                format!("Price inside a {} order block", zone.direction),
                "ORDER_BLOCK",
            );
        }
    }

    Signal::wait(0.0, "No clear SMC setup")
}
