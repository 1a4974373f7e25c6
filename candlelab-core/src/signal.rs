//! Trading signal: the unifying output record of every analyzer.

use serde::{Deserialize, Serialize};

/// Recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
    Wait,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Wait => write!(f, "WAIT"),
        }
    }
}

/// A synthesized trading signal with its attribution.
///
/// Entry/stop/target are present only when `action != Wait`; the analyzers
/// themselves never fill them (price levels come from the external
/// arbitration step), but the record carries them so one type serves both
/// sides of that boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub action: Action,
    /// 0–100.
    pub confidence: f64,
    pub reason: String,
    /// What fired: an event name ("SPRING"), a zone kind ("FVG"), etc.
    pub trigger: Option<String>,
    pub entry: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
}

impl Signal {
    /// A directional signal with no price levels attached.
    pub fn directional(
        action: Action,
        confidence: f64,
        reason: impl Into<String>,
        trigger: impl Into<String>,
    ) -> Self {
        Self {
            action,
            confidence,
            reason: reason.into(),
            trigger: Some(trigger.into()),
            entry: None,
            stop_loss: None,
            take_profit: None,
        }
    }

    /// A wait signal with an explanatory reason.
    pub fn wait(confidence: f64, reason: impl Into<String>) -> Self {
        Self {
            action: Action::Wait,
            confidence,
            reason: reason.into(),
            trigger: None,
            entry: None,
            stop_loss: None,
            take_profit: None,
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.action != Action::Wait
    }
}
