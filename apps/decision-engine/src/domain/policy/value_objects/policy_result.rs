//! Permission postures and policy outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission token produced by exactly one policy per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyAction {
    /// Authorized to open a position.
    Allow,
    /// Interesting, keep watching.
    Watch,
    /// Do nothing.
    Hold,
    /// Vetoed.
    Block,
    /// Needs operator attention.
    Escalate,
    /// A protection override fired.
    Overridden,
    /// Intent present but not yet triggered.
    Deferred,
}

impl PolicyAction {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Watch => "WATCH",
            Self::Hold => "HOLD",
            Self::Block => "BLOCK",
            Self::Escalate => "ESCALATE",
            Self::Overridden => "OVERRIDDEN",
            Self::Deferred => "DEFERRED",
        }
    }

    /// Whether this posture authorizes a new entry.
    #[must_use]
    pub const fn permits_entry(self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of applying one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyResult {
    /// Permission posture.
    pub action: PolicyAction,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Names of rules that requested a trade.
    pub triggered_rules: Vec<String>,
    /// Reasons that shaped the posture.
    pub gating_reasons: Vec<String>,
    /// Policy that produced this result.
    pub policy_name: String,
}

impl PolicyResult {
    /// Create a result. Confidence is clamped to [0, 1]; NaN becomes 0.
    #[must_use]
    pub fn new(
        action: PolicyAction,
        confidence: f64,
        triggered_rules: Vec<String>,
        gating_reasons: Vec<String>,
        policy_name: impl Into<String>,
    ) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            action,
            confidence,
            triggered_rules,
            gating_reasons,
            policy_name: policy_name.into(),
        }
    }
}
