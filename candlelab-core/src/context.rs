//! Arbitration context assembly and decision records.
//!
//! The analyzers are deliberately mechanical; the final trade arbitration
//! happens outside this crate (a human, a rules layer, or a model). This
//! module renders everything the arbiter needs into one text document and
//! parses the decision that comes back, enforcing the confidence floor on
//! the way in.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::Candle;
use crate::indicators::IndicatorSummary;
use crate::patterns::PatternReport;
use crate::signal::Action;
use crate::smc::SmcResult;
use crate::wyckoff::{Phase, WyckoffResult};

/// Decisions below this confidence are forced to WAIT.
pub const CONFIDENCE_FLOOR: f64 = 70.0;

const SECTION_RULE: &str = "═══════════════════════════════════════";

/// Assembles the market context document, section by section.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    sections: Vec<String>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn section(&mut self, title: &str, body: String) -> &mut Self {
        self.sections
            .push(format!("{SECTION_RULE}\n{title}\n{SECTION_RULE}\n{body}"));
        self
    }

    /// The last `tail` candles as one line per bar.
    pub fn market_data(&mut self, symbol: &str, candles: &[Candle], tail: usize) -> &mut Self {
        let start = candles.len().saturating_sub(tail);
        let mut body = format!("Symbol: {symbol}\n");
        for c in &candles[start..] {
            body.push_str(&format!(
                "{} O:{:.2} H:{:.2} L:{:.2} C:{:.2} V:{:.0}\n",
                c.timestamp.format("%Y-%m-%d %H:%M"),
                c.open,
                c.high,
                c.low,
                c.close,
                c.volume
            ));
        }
        self.section("MARKET DATA", body)
    }

    pub fn indicators(&mut self, summary: &IndicatorSummary) -> &mut Self {
        self.section("TECHNICAL INDICATORS", summary.render())
    }

    pub fn patterns(&mut self, report: &PatternReport) -> &mut Self {
        self.section("CANDLESTICK PATTERNS", report.render())
    }

    pub fn wyckoff(&mut self, result: &WyckoffResult) -> &mut Self {
        self.section("WYCKOFF ANALYSIS", result.render())
    }

    pub fn smc(&mut self, result: &SmcResult) -> &mut Self {
        self.section("SMC ANALYSIS", result.render())
    }

    /// Free-form news context, included only when non-empty.
    pub fn news(&mut self, news: &str) -> &mut Self {
        if news.trim().is_empty() {
            return self;
        }
        self.section("NEWS CONTEXT", news.trim().to_string())
    }

    /// Prior decisions, newest last, so the arbiter can stay consistent
    /// across polling cycles. Omitted when there is no history.
    pub fn history(&mut self, decisions: &[DecisionRecord]) -> &mut Self {
        if decisions.is_empty() {
            return self;
        }
        let mut body = String::new();
        for d in decisions {
            body.push_str(&format!(
                "{} (confidence {:.0}) — {}\n",
                d.action, d.confidence, d.reason
            ));
        }
        body.push_str("Stay consistent with these unless the structure has changed.");
        self.section("RECENT DECISIONS", body)
    }

    pub fn build(&self) -> String {
        let mut doc = self.sections.join("\n");
        doc.push_str(&format!(
            "\n{SECTION_RULE}\nDecide on the data above and answer in the agreed JSON format.\n\
             Remember: confidence below {CONFIDENCE_FLOOR:.0} means the action MUST be WAIT.\n"
        ));
        doc
    }
}

/// A trade decision handed back by the arbiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub action: Action,
    #[serde(default = "unknown_phase")]
    pub wyckoff_phase: Phase,
    #[serde(default)]
    pub event_detected: Option<String>,
    #[serde(default)]
    pub smc_trigger: Option<String>,
    #[serde(default)]
    pub entry: Option<f64>,
    #[serde(default)]
    pub stoploss: Option<f64>,
    #[serde(default)]
    pub takeprofit: Option<f64>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub reason: String,
}

fn unknown_phase() -> Phase {
    Phase::Unknown
}

impl DecisionRecord {
    /// A WAIT record carrying only a reason.
    pub fn wait(reason: impl Into<String>) -> Self {
        Self {
            action: Action::Wait,
            wyckoff_phase: Phase::Unknown,
            event_detected: None,
            smc_trigger: None,
            entry: None,
            stoploss: None,
            takeprofit: None,
            confidence: 0.0,
            reason: reason.into(),
        }
    }

    /// Enforce the confidence floor: a directional call below the floor is
    /// demoted to WAIT and its price levels are cleared, keeping the stated
    /// confidence and reason for the audit trail.
    pub fn normalize(mut self) -> Self {
        if self.confidence < CONFIDENCE_FLOOR && self.action != Action::Wait {
            warn!(
                confidence = self.confidence,
                action = %self.action,
                "decision below confidence floor, demoting to WAIT"
            );
            self.action = Action::Wait;
            self.entry = None;
            self.stoploss = None;
            self.takeprofit = None;
        }
        self
    }

    /// Parse a decision out of free text.
    ///
    /// The arbiter's reply may wrap the JSON object in prose; the first
    /// braced object found is parsed and normalized. Any failure degrades to
    /// a WAIT record rather than an error, since "could not decide" and
    /// "decided to wait" act the same downstream.
    pub fn parse(text: &str) -> Self {
        let Some(raw) = extract_json_object(text) else {
            return Self::wait("no JSON object in arbiter reply");
        };
        match serde_json::from_str::<Self>(raw) {
            Ok(record) => record.normalize(),
            Err(err) => {
                warn!(%err, "failed to parse decision record");
                Self::wait(format!("malformed decision: {err}"))
            }
        }
    }
}

/// The first flat `{...}` block in the text.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text[start..].find('}')? + start;
    Some(&text[start..=end])
}
