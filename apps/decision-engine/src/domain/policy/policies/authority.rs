//! Default policy: mirror the evaluator's authority hierarchy.

use super::{Policy, PolicyContext};
use crate::domain::decision::DecisionType;
use crate::domain::policy::value_objects::{PolicyAction, PolicyResult};

/// Maps each decision token onto its permission posture one-to-one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorityPolicy;

impl Policy for AuthorityPolicy {
    fn name(&self) -> &'static str {
        "authority"
    }

    fn apply(&self, ctx: &PolicyContext<'_>) -> PolicyResult {
        let verdict = ctx.verdict;
        let (action, confidence) = match verdict.decision {
            DecisionType::AllowBuy => (PolicyAction::Allow, 1.0),
            DecisionType::Blocked => (PolicyAction::Block, 1.0),
            DecisionType::Overridden => (PolicyAction::Overridden, 1.0),
            DecisionType::Deferred => (PolicyAction::Deferred, 0.5),
            DecisionType::NoAction => (PolicyAction::Hold, 1.0),
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
