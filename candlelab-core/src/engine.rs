//! The analysis engine: one series in, every analyzer's verdict out.
//!
//! The four analyzers are independent pure functions of the series, so they
//! fan out across the rayon pool and join into a single bundle.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::context::ContextBuilder;
use crate::domain::Candle;
use crate::indicators::IndicatorSummary;
use crate::patterns::PatternReport;
use crate::smc::{SmcAnalyzer, SmcResult};
use crate::wyckoff::{WyckoffAnalyzer, WyckoffResult};

/// Everything one analysis pass produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisBundle {
    pub indicators: IndicatorSummary,
    pub patterns: PatternReport,
    pub wyckoff: WyckoffResult,
    pub smc: SmcResult,
}

/// Runs all analyzers over a candle series.
#[derive(Debug, Clone)]
pub struct MarketAnalyzer {
    cfg: AnalysisConfig,
    wyckoff: WyckoffAnalyzer,
    smc: SmcAnalyzer,
}

impl MarketAnalyzer {
    pub fn new(cfg: AnalysisConfig) -> Self {
        let wyckoff = WyckoffAnalyzer::new(cfg.wyckoff.clone());
        let smc = SmcAnalyzer::new(cfg.smc.clone());
        Self { cfg, wyckoff, smc }
    }

    /// Run every analyzer over the series in parallel.
    pub fn analyze(&self, candles: &[Candle]) -> AnalysisBundle {
        let ((indicators, patterns), (wyckoff, smc)) = rayon::join(
            || {
                rayon::join(
                    || IndicatorSummary::compute(candles, &self.cfg.indicators),
                    || PatternReport::scan(candles, &self.cfg.patterns),
                )
            },
            || {
                rayon::join(
                    || self.wyckoff.analyze(candles),
                    || self.smc.analyze(candles),
                )
            },
        );
        debug!(bars = candles.len(), "analysis bundle assembled");
        AnalysisBundle {
            indicators,
            patterns,
            wyckoff,
            smc,
        }
    }

    /// Analyze and render the full arbitration context in one step.
    pub fn build_context(
        &self,
        symbol: &str,
        candles: &[Candle],
        tail: usize,
        news: Option<&str>,
    ) -> (AnalysisBundle, String) {
        let bundle = self.analyze(candles);
        let mut builder = ContextBuilder::new();
        builder
            .market_data(symbol, candles, tail)
            .indicators(&bundle.indicators)
            .patterns(&bundle.patterns)
            .wyckoff(&bundle.wyckoff)
            .smc(&bundle.smc);
        if let Some(news) = news {
            builder.news(news);
        }
        (bundle, builder.build())
    }
}
