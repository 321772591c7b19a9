//! Monitor output.

use serde::{Deserialize, Serialize};

use super::SystemicMode;

/// Instantaneous risk directive for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDirective {
    /// Classified regime.
    pub mode: SystemicMode,
    /// Close every open position now.
    pub flatten_all: bool,
    /// Refuse new entries.
    pub block_new_entries: bool,
    /// Continuous size multiplier in [0, 1].
    pub size_multiplier: f64,
    /// Escalate telemetry.
    pub increase_telemetry: bool,
    /// Human-readable reason.
    pub reason: String,
}

/// Directive plus the figures behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeAssessment {
    /// The directive.
    pub directive: RiskDirective,
    /// Mean of the sanitized inputs.
    pub composite: f64,
    /// Whether any single input tripped its hard level.
    pub hard_interrupt: bool,
    /// Inputs that tripped, empty unless `hard_interrupt`.
    pub tripped: Vec<String>,
}
