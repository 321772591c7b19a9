//! Orchestrator output consumed by sizing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk-level label attached to a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Calm.
    Normal,
    /// Stressed but trading.
    Cautious,
    /// Near rupture.
    Elevated,
    /// Rupture.
    SystemicLockdown,
    /// Post-flatten lock.
    CapitalPreservation,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Normal => "normal",
            Self::Cautious => "cautious",
            Self::Elevated => "elevated",
            Self::SystemicLockdown => "systemic_lockdown",
            Self::CapitalPreservation => "capital_preservation",
        };
        f.write_str(label)
    }
}

/// Whether and how large new entries may be this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionDirective {
    /// Whether new entries are allowed.
    pub allow_entries: bool,
    /// Size multiplier in [0, 1].
    pub size_multiplier: f64,
    /// Risk label.
    pub risk_level: RiskLevel,
}

impl ExecutionDirective {
    /// Create a directive. The multiplier is clamped to [0, 1]; NaN becomes 0.
    #[must_use]
    pub fn new(allow_entries: bool, size_multiplier: f64, risk_level: RiskLevel) -> Self {
        let size_multiplier = if size_multiplier.is_nan() {
            0.0
        } else {
            size_multiplier.clamp(0.0, 1.0)
        };
        Self {
            allow_entries,
            size_multiplier,
            risk_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_clamped() {
        assert_eq!(ExecutionDirective::new(true, 3.0, RiskLevel::Normal).size_multiplier, 1.0);
        assert_eq!(ExecutionDirective::new(true, -1.0, RiskLevel::Normal).size_multiplier, 0.0);
        assert_eq!(ExecutionDirective::new(true, f64::NAN, RiskLevel::Normal).size_multiplier, 0.0);
    }

    #[test]
    fn risk_level_labels() {
        assert_eq!(RiskLevel::CapitalPreservation.to_string(), "capital_preservation");
        assert_eq!(
            serde_json::to_string(&RiskLevel::SystemicLockdown).unwrap(),
            "\"systemic_lockdown\""
        );
    }
}
