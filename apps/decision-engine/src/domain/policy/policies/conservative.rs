//! Require corroborating intents before allowing.

use super::{Policy, PolicyContext};
use crate::domain::policy::value_objects::{PolicyAction, PolicyResult};

/// Scales posture with the number of triggered intents: none holds, one
/// watches, two or more allow with confidence rising 0.05 per extra
/// trigger up to 0.95.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativePolicy;

impl Policy for ConservativePolicy {
    fn name(&self) -> &'static str {
        "conservative"
    }

    fn apply(&self, ctx: &PolicyContext<'_>) -> PolicyResult {
        let verdict = ctx.verdict;
        let triggers = verdict.triggered_rules.len();
        let (action, confidence) = match triggers {
            0 => (PolicyAction::Hold, 0.95),
            1 => (PolicyAction::Watch, 0.70),
            n => (
                PolicyAction::Allow,
                0.05f64.mul_add((n - 2) as f64, 0.85).min(0.95),
            ),
        };
        PolicyResult::new(
            action,
            confidence,
            verdict.triggered_rules.clone(),
            verdict.gating_reasons.clone(),
            self.name(),
        )
    }
}
