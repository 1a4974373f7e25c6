//! Wyckoff analysis: phase classification, event detection, VSA.
//!
//! The analyzer works over the trailing `lookback` window of the series and
//! recomputes everything fresh on every call. Below `min_bars` candles it
//! returns an Unknown/empty result rather than guessing.

mod events;
mod phase;
mod vsa;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WyckoffConfig;
use crate::domain::Candle;
use crate::preprocess::SeriesStats;
use crate::signal::{Action, Signal};

pub use vsa::{VsaReading, VsaSignal};

/// Wyckoff market phase over the trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Accumulation,
    Distribution,
    Markup,
    Markdown,
    Unknown,
}

impl Phase {
    pub fn description(self) -> &'static str {
        match self {
            Self::Accumulation => "Accumulation — composite man is buying",
            Self::Distribution => "Distribution — composite man is selling",
            Self::Markup => "Markup — uptrend in force",
            Self::Markdown => "Markdown — downtrend in force",
            Self::Unknown => "No clear phase",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Accumulation => "ACCUMULATION",
            Self::Distribution => "DISTRIBUTION",
            Self::Markup => "MARKUP",
            Self::Markdown => "MARKDOWN",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

/// Wyckoff event vocabulary.
///
/// Only Spring, Upthrust, SOS and SOW are currently produced by the
/// detectors; the rest of the vocabulary exists so callers persisting
/// events have the full taxonomy available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Spring,
    Upthrust,
    Sos,
    Sow,
    SellingClimax,
    BuyingClimax,
    AutomaticRally,
    SecondaryTest,
    LastPointOfSupport,
    LastPointOfSupply,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Spring => "SPRING",
            Self::Upthrust => "UPTHRUST",
            Self::Sos => "SOS",
            Self::Sow => "SOW",
            Self::SellingClimax => "SC",
            Self::BuyingClimax => "BC",
            Self::AutomaticRally => "AR",
            Self::SecondaryTest => "ST",
            Self::LastPointOfSupport => "LPS",
            Self::LastPointOfSupply => "LPSY",
        };
        write!(f, "{s}")
    }
}

/// A detected Wyckoff event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WyckoffEvent {
    pub kind: EventKind,
    /// 0–100.
    pub confidence: f64,
    /// The support/resistance or close the event references.
    pub price_level: f64,
    pub volume_confirmed: bool,
    pub description: String,
}

/// Complete output of one Wyckoff analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WyckoffResult {
    pub phase: Phase,
    pub events: Vec<WyckoffEvent>,
    /// `None` when the series was too short to analyze.
    pub vsa: Option<VsaReading>,
    /// `None` when the series was too short to analyze.
    pub signal: Option<Signal>,
}

impl WyckoffResult {
    fn insufficient() -> Self {
        Self {
            phase: Phase::Unknown,
            events: Vec::new(),
            vsa: None,
            signal: None,
        }
    }

    /// Render the result as text lines for the arbitration context.
    pub fn render(&self) -> String {
        let mut lines = vec![format!(
            "Phase: {} ({})",
            self.phase,
            self.phase.description()
        )];
        for event in &self.events {
            lines.push(format!(
                "Event: {} at {:.2} (confidence {:.0}{}) — {}",
                event.kind,
                event.price_level,
                event.confidence,
                if event.volume_confirmed {
                    ", volume confirmed"
                } else {
                    ""
                },
                event.description,
            ));
        }
        if let Some(vsa) = &self.vsa {
            lines.push(format!("VSA: {} — {}", vsa.signal, vsa.description));
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

/// Phase classifier plus event detectors over a rolling window.
#[derive(Debug, Clone)]
pub struct WyckoffAnalyzer {
    cfg: WyckoffConfig,
}

impl WyckoffAnalyzer {
    pub fn new(cfg: WyckoffConfig) -> Self {
        Self { cfg }
    }

    /// Analyze the trailing window of the series.
    ///
    /// Pure: repeated calls over the same series return identical results.
    pub fn analyze(&self, candles: &[Candle]) -> WyckoffResult {
        let cfg = &self.cfg;
        let window = &candles[candles.len().saturating_sub(cfg.lookback)..];
        if window.len() < cfg.min_bars {
            debug!(bars = window.len(), min = cfg.min_bars, "wyckoff: insufficient data");
            return WyckoffResult::insufficient();
        }

        let stats = SeriesStats::compute(window);

        let phase = phase::classify(window, cfg);

        let mut events = Vec::new();
        if let Some(spring) = events::detect_spring(window, &stats, cfg) {
            events.push(spring);
        }
        if let Some(upthrust) = events::detect_upthrust(window, &stats, cfg) {
            events.push(upthrust);
        }
        if let Some(sos) = events::detect_sos(window, &stats, cfg) {
            events.push(sos);
        }
        if let Some(sow) = events::detect_sow(window, &stats, cfg) {
            events.push(sow);
        }

        let vsa = vsa::analyze(window, &stats);
        let signal = synthesize_signal(phase, &events);

        debug!(%phase, events = events.len(), action = %signal.action, "wyckoff analysis complete");

        WyckoffResult {
            phase,
            events,
            vsa: Some(vsa),
            signal: Some(signal),
        }
    }
}

/// Priority synthesis: the first qualifying event wins, in detector order.
/// Deliberately no blending or weighted scoring; downstream consumers rely
/// on this exact tie-break.
fn synthesize_signal(phase: Phase, events: &[WyckoffEvent]) -> Signal {
    for event in events {
        match event.kind {
            EventKind::Spring if event.confidence > 70.0 => {
                return Signal::directional(
                    Action::Buy,
                    event.confidence,
                    event.description.clone(),
                    "SPRING",
                );
            }
            EventKind::Upthrust if event.confidence > 70.0 => {
                return Signal::directional(
                    Action::Sell,
                    event.confidence,
                    event.description.clone(),
                    "UPTHRUST",
                );
            }
            EventKind::Sos => {
                return Signal::directional(
                    Action::Buy,
                    event.confidence,
                    event.description.clone(),
                    "SOS",
                );
            }
            EventKind::Sow => {
                return Signal::directional(
                    Action::Sell,
                    event.confidence,
                    event.description.clone(),
                    "SOW",
                );
            }
            _ => {}
        }
    }

    match phase {
        Phase::Accumulation => Signal::wait(
            30.0,
            "Accumulation phase — waiting for a Spring or SOS before buying",
        ),
        Phase::Distribution => Signal::wait(
            30.0,
            "Distribution phase — waiting for an Upthrust or SOW before selling",
        ),
        _ => Signal::wait(0.0, "No clear Wyckoff signal"),
    }
}
