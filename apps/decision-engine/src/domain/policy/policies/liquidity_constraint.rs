//! Refuse thin markets regardless of intent.

use super::{Policy, PolicyContext};
use crate::domain::decision::DecisionType;
use crate::domain::policy::value_objects::{PolicyAction, PolicyResult};

/// `BLOCK` when liquidity is under the floor (a missing reading counts as
/// zero), otherwise act like [`IntentExecutionPolicy`](super::IntentExecutionPolicy).
#[derive(Debug, Clone, Copy)]
pub struct LiquidityConstraintPolicy {
    min_liquidity: f64,
}

impl LiquidityConstraintPolicy {
    /// Create with a liquidity floor.
    #[must_use]
    pub const fn new(min_liquidity: f64) -> Self {
        Self { min_liquidity }
    }
}

impl Default for LiquidityConstraintPolicy {
    fn default() -> Self {
        Self::new(0.2)
    }
}

impl Policy for LiquidityConstraintPolicy {
    fn name(&self) -> &'static str {
        "liquidity_constraint"
    }

    fn apply(&self, ctx: &PolicyContext<'_>) -> PolicyResult {
        let verdict = ctx.verdict;
        let liquidity = ctx.state.capacity().liquidity.unwrap_or(0.0);

        if liquidity.is_nan() || liquidity < self.min_liquidity {
            return PolicyResult::new(
                PolicyAction::Block,
                1.0,
                verdict.triggered_rules.clone(),
                vec![format!(
                    "Liquidity {liquidity:.2} below {:.2}",
                    self.min_liquidity
                )],
                self.name(),
            );
        }

        let (action, confidence) = if verdict.decision == DecisionType::AllowBuy {
            (PolicyAction::Allow, 1.0)
        } else {
            (PolicyAction::Hold, 0.5)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::MarketState;
    use crate::domain::policy::services::PolicyVerdict;
    use crate::domain::shared::Timestamp;

    fn apply(liquidity: Option<f64>) -> PolicyResult {
        let builder = MarketState::builder("TEST", "test", Timestamp::from_unix_seconds(0).unwrap());
        let state = match liquidity {
            Some(l) => builder.with_liquidity(l).build(),
            None => builder.build(),
        };
        let verdict = PolicyVerdict {
            decision: DecisionType::AllowBuy,
            triggered_rules: vec!["coherence_threshold".to_string()],
            gating_reasons: vec![],
        };
        LiquidityConstraintPolicy::default().apply(&PolicyContext {
            verdict: &verdict,
            state: &state,
        })
    }

    #[test]
    fn blocks_thin_liquidity() {
        assert_eq!(apply(Some(0.1)).action, PolicyAction::Block);
    }

    #[test]
    fn missing_liquidity_counts_as_zero() {
        assert_eq!(apply(None).action, PolicyAction::Block);
    }

    #[test]
    fn allows_deep_market() {
        assert_eq!(apply(Some(0.2)).action, PolicyAction::Allow);
    }
}
