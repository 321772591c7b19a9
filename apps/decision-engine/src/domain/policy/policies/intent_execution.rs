//! Act on any triggered intent.

use super::{Policy, PolicyContext};
use crate::domain::decision::DecisionType;
use crate::domain::policy::value_objects::{PolicyAction, PolicyResult};

/// `ALLOW` on a triggered intent, otherwise `HOLD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentExecutionPolicy;

impl Policy for IntentExecutionPolicy {
    fn name(&self) -> &'static str {
        "intent_execution"
    }

    fn apply(&self, ctx: &PolicyContext<'_>) -> PolicyResult {
        let verdict = ctx.verdict;
        if verdict.decision == DecisionType::AllowBuy {
            PolicyResult::new(
                PolicyAction::Allow,
                1.0,
                verdict.triggered_rules.clone(),
                verdict.gating_reasons.clone(),
                self.name(),
            )
        } else {
            PolicyResult::new(
                PolicyAction::Hold,
                0.5,
                verdict.triggered_rules.clone(),
                vec!["No intent trigger".to_string()],
                self.name(),
            )
        }
    }
}
