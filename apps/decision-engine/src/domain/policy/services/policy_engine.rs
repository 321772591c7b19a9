//! Policy Engine: hard gates, then exactly one configured policy.

use crate::domain::decision::{DecisionType, MarketGateResult, MarketState, RuleResult};
use crate::domain::policy::policies::{AuthorityPolicy, Policy, PolicyContext};
use crate::domain::policy::value_objects::{PolicyAction, PolicyResult};

use super::policy_evaluator::PolicyEvaluator;

/// Applies the evaluator's hard gates and then one pluggable policy.
///
/// `BLOCKED` and `OVERRIDDEN` verdicts are final: no policy can turn them
/// into a more permissive posture.
pub struct PolicyEngine {
    evaluator: PolicyEvaluator,
    policy: Box<dyn Policy>,
}

impl PolicyEngine {
    /// Create an engine applying `policy`.
    #[must_use]
    pub fn new(policy: Box<dyn Policy>) -> Self {
        Self {
            evaluator: PolicyEvaluator::new(),
            policy,
        }
    }

    /// Name of the configured policy.
    #[must_use]
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Evaluate one state's rule trace.
    #[must_use]
    pub fn evaluate(
        &self,
        state: &MarketState,
        results: &[RuleResult],
        gate: &MarketGateResult,
    ) -> PolicyResult {
        let verdict = self.evaluator.assess(results, gate);

        let result = match verdict.decision {
            DecisionType::Blocked => PolicyResult::new(
                PolicyAction::Block,
                1.0,
                verdict.triggered_rules,
                verdict.gating_reasons,
                self.policy.name(),
            ),
            DecisionType::Overridden => PolicyResult::new(
                PolicyAction::Overridden,
                1.0,
                verdict.triggered_rules,
                verdict.gating_reasons,
                self.policy.name(),
            ),
            DecisionType::AllowBuy | DecisionType::Deferred | DecisionType::NoAction => {
                self.policy.apply(&PolicyContext {
                    verdict: &verdict,
                    state,
                })
            }
        };

        tracing::debug!(
            symbol = %state.symbol(),
            policy = %result.policy_name,
            action = %result.action,
            confidence = result.confidence,
            "Policy applied"
        );

        result
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new(Box::new(AuthorityPolicy))
    }
}

impl std::fmt::Debug for PolicyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyEngine")
            .field("policy", &self.policy.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::RuleCategory;
    use crate::domain::policy::policies::{ConservativePolicy, ObservationOnlyPolicy};
    use crate::domain::shared::Timestamp;

    fn state() -> MarketState {
        MarketState::builder("TEST", "test", Timestamp::from_unix_seconds(0).unwrap()).build()
    }

    fn triggered(name: &str) -> RuleResult {
        RuleResult::trigger(name, RuleCategory::Intent, "fired")
    }

    #[test]
    fn constraint_veto_is_block_despite_intent() {
        let results = vec![
            triggered("coherence_threshold"),
            RuleResult::block("latency", RuleCategory::Constraint, "LATENCY_FAIL"),
        ];
        let result = PolicyEngine::default().evaluate(&state(), &results, &MarketGateResult::confirmed());
        assert_eq!(result.action, PolicyAction::Block);
        assert_eq!(result.triggered_rules, vec!["coherence_threshold".to_string()]);
    }

    #[test]
    fn permissive_policy_cannot_lift_a_block() {
        let results = vec![
            triggered("a"),
            triggered("b"),
            triggered("c"),
            RuleResult::block("latency", RuleCategory::Constraint, "LATENCY_FAIL"),
        ];
        let engine = PolicyEngine::new(Box::new(ConservativePolicy));
        let result = engine.evaluate(&state(), &results, &MarketGateResult::confirmed());
        assert_eq!(result.action, PolicyAction::Block);
        assert_eq!(result.policy_name, "conservative");
    }

    #[test]
    fn override_surfaces_as_overridden() {
        let results = vec![
            triggered("a"),
            RuleResult::override_with("chaos_circuit_breaker", "CHAOS_HALT", "chaos"),
        ];
        let result = PolicyEngine::default().evaluate(&state(), &results, &MarketGateResult::confirmed());
        assert_eq!(result.action, PolicyAction::Overridden);
    }

    #[test]
    fn configured_policy_applies_when_ungated() {
        let engine = PolicyEngine::new(Box::new(ObservationOnlyPolicy));
        let result = engine.evaluate(&state(), &[triggered("a")], &MarketGateResult::confirmed());
        assert_eq!(result.action, PolicyAction::Hold);
        assert_eq!(engine.policy_name(), "observation_only");
    }

    #[test]
    fn repeated_evaluation_is_identical() {
        let engine = PolicyEngine::default();
        let results = vec![triggered("a")];
        let gate = MarketGateResult::confirmed();
        assert_eq!(
            engine.evaluate(&state(), &results, &gate),
            engine.evaluate(&state(), &results, &gate)
        );
    }
}
