//! Never trade.

use super::{Policy, PolicyContext};
use crate::domain::policy::value_objects::{PolicyAction, PolicyResult};

/// Always `HOLD`; records what would have triggered.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservationOnlyPolicy;

impl Policy for ObservationOnlyPolicy {
    fn name(&self) -> &'static str {
        "observation_only"
    }

    fn apply(&self, ctx: &PolicyContext<'_>) -> PolicyResult {
        PolicyResult::new(
            PolicyAction::Hold,
            1.0,
            ctx.verdict.triggered_rules.clone(),
            vec!["Observation mode".to_string()],
            self.name(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{DecisionType, MarketState};
    use crate::domain::policy::services::PolicyVerdict;
    use crate::domain::shared::Timestamp;

    #[test]
    fn holds_even_when_intent_fires() {
        let state = MarketState::builder("TEST", "test", Timestamp::from_unix_seconds(0).unwrap()).build();
        let verdict = PolicyVerdict {
            decision: DecisionType::AllowBuy,
            triggered_rules: vec!["coherence_threshold".to_string()],
            gating_reasons: vec![],
        };
        let result = ObservationOnlyPolicy.apply(&PolicyContext {
            verdict: &verdict,
            state: &state,
        });
        assert_eq!(result.action, PolicyAction::Hold);
        assert_eq!(result.triggered_rules, vec!["coherence_threshold".to_string()]);
    }
}
