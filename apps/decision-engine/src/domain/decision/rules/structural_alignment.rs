//! Structural alignment across fractal levels (HYBRID).

use super::Rule;
use crate::domain::decision::value_objects::{MarketState, RuleCategory, RuleResult};

/// Requests a trade when every structural level agrees, vetoes when any
/// level has broken down. Abstains without a structural breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructuralAlignmentRule {
    min_alignment: f64,
    breakdown_floor: f64,
}

impl StructuralAlignmentRule {
    /// Rule identifier.
    pub const NAME: &'static str = "structural_alignment";

    /// Create with the mean level needed to request and the level at or
    /// below which a single level vetoes.
    #[must_use]
    pub const fn new(min_alignment: f64, breakdown_floor: f64) -> Self {
        Self {
            min_alignment,
            breakdown_floor,
        }
    }
}

impl Default for StructuralAlignmentRule {
    fn default() -> Self {
        Self::new(0.70, 0.20)
    }
}

impl Rule for StructuralAlignmentRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Hybrid
    }

    fn evaluate(&self, state: &MarketState) -> RuleResult {
        let levels = state.fractal_levels();
        if levels.is_empty() {
            return RuleResult::abstain(Self::NAME, self.category(), "STRUCTURE_ABSENT");
        }
        if levels.values().any(|v| !v.is_finite()) {
            return RuleResult::block(Self::NAME, self.category(), "STRUCTURE_INVALID");
        }

        if let Some((level, value)) = levels.iter().find(|(_, v)| **v <= self.breakdown_floor) {
            return RuleResult::block(
                Self::NAME,
                self.category(),
                format!("STRUCTURAL_BREAKDOWN({level}={value:.2})"),
            );
        }

        let mean = levels.values().sum::<f64>() / levels.len() as f64;
        let triggered = mean >= self.min_alignment;
        RuleResult::evaluated(
            Self::NAME,
            self.category(),
            triggered,
            format!("alignment={mean:.3} across {} levels", levels.len()),
        )
        .with_score(mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Timestamp;

    fn state(levels: &[(&str, f64)]) -> MarketState {
        levels
            .iter()
            .fold(
                MarketState::builder("TEST", "test", Timestamp::from_unix_seconds(0).unwrap()),
                |b, (name, v)| b.with_fractal_level(*name, *v),
            )
            .build()
    }

    #[test]
    fn abstains_without_levels() {
        let result = StructuralAlignmentRule::default().evaluate(&state(&[]));
        assert!(!result.is_triggered());
        assert!(!result.is_blocking());
    }

    #[test]
    fn aligned_levels_request() {
        let result = StructuralAlignmentRule::default().evaluate(&state(&[("micro", 0.8), ("macro", 0.7)]));
        assert!(result.requests_trade());
        assert!(!result.is_blocking());
    }

    #[test]
    fn one_broken_level_vetoes() {
        let result = StructuralAlignmentRule::default().evaluate(&state(&[("micro", 0.95), ("macro", 0.1)]));
        assert!(result.is_blocking());
        assert!(result.reason().contains("macro"));
    }

    #[test]
    fn middling_levels_neither_request_nor_block() {
        let result = StructuralAlignmentRule::default().evaluate(&state(&[("micro", 0.5), ("macro", 0.5)]));
        assert!(!result.is_triggered());
        assert!(!result.is_blocking());
    }
}
