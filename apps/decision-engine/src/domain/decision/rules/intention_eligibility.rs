//! Intention eligibility floor (CONSTRAINT).

use super::Rule;
use crate::domain::decision::value_objects::{MarketState, RuleCategory, RuleResult};

/// Vetoes states whose raw metrics are too weak or too chaotic to act on,
/// whatever the blended coherence says.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentionEligibilityRule {
    min_intention: f64,
    min_coherence: f64,
    max_chaos: f64,
}

impl IntentionEligibilityRule {
    /// Rule identifier.
    pub const NAME: &'static str = "intention_eligibility";

    /// Create with explicit floors and ceiling.
    #[must_use]
    pub const fn new(min_intention: f64, min_coherence: f64, max_chaos: f64) -> Self {
        Self {
            min_intention,
            min_coherence,
            max_chaos,
        }
    }
}

impl Default for IntentionEligibilityRule {
    fn default() -> Self {
        Self::new(0.20, 0.30, 0.60)
    }
}

impl Rule for IntentionEligibilityRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Constraint
    }

    fn evaluate(&self, state: &MarketState) -> RuleResult {
        let (intention, coherence, chaos) = (state.intention(), state.coherence(), state.chaos());
        if ![intention, coherence, chaos].iter().all(|v| v.is_finite()) {
            return RuleResult::block(Self::NAME, self.category(), "METRICS_INVALID");
        }

        let mut failures = Vec::new();
        if intention < self.min_intention {
            failures.push(format!("INTENTION_BELOW_MIN({intention:.2}<{:.2})", self.min_intention));
        }
        if coherence < self.min_coherence {
            failures.push(format!("COHERENCE_BELOW_MIN({coherence:.2}<{:.2})", self.min_coherence));
        }
        if chaos > self.max_chaos {
            failures.push(format!("CHAOS_ABOVE_MAX({chaos:.2}>{:.2})", self.max_chaos));
        }

        if failures.is_empty() {
            RuleResult::trigger(Self::NAME, self.category(), "ELIGIBLE")
        } else {
            RuleResult::block(Self::NAME, self.category(), failures.join("; "))
        }
    }
}
