//! Built-in decision rules.
//!
//! Each rule is a pure function of one [`MarketState`]. A rule that cannot
//! compute abstains with a reason instead of failing.
//!
//! | Rule | Category |
//! |------|----------|
//! | [`CoherenceThresholdRule`] | INTENT |
//! | [`NarrativeAccelerationRule`] | INTENT |
//! | [`StructuralAlignmentRule`] | HYBRID |
//! | [`IntentionEligibilityRule`] | CONSTRAINT |
//! | [`NarrativePriceLatencyRule`] | CONSTRAINT |
//! | [`ChaosCircuitBreakerRule`] | PROTECTION |

mod chaos_circuit_breaker;
mod coherence_threshold;
mod intention_eligibility;
mod narrative_acceleration;
mod narrative_price_latency;
mod structural_alignment;

pub use chaos_circuit_breaker::{CHAOS_HALT, ChaosCircuitBreakerRule};
pub use coherence_threshold::{CoherenceThresholdRule, DomainProfile, standard_profiles};
pub use intention_eligibility::IntentionEligibilityRule;
pub use narrative_acceleration::NarrativeAccelerationRule;
pub use narrative_price_latency::NarrativePriceLatencyRule;
pub use structural_alignment::StructuralAlignmentRule;

use super::value_objects::{MarketState, RuleCategory, RuleResult};

/// A single decision rule.
pub trait Rule {
    /// Stable identifier used in traces.
    fn name(&self) -> &'static str;

    /// Authority class.
    fn category(&self) -> RuleCategory;

    /// Evaluate against one state. Must not panic and must be deterministic.
    fn evaluate(&self, state: &MarketState) -> RuleResult;
}

/// Tagged rule variant stored in the registry arena.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionRule {
    /// Domain-aware coherence threshold.
    CoherenceThreshold(CoherenceThresholdRule),
    /// Narrative acceleration.
    NarrativeAcceleration(NarrativeAccelerationRule),
    /// Structural alignment.
    StructuralAlignment(StructuralAlignmentRule),
    /// Intention eligibility floor.
    IntentionEligibility(IntentionEligibilityRule),
    /// Narrative-to-price latency coupling.
    NarrativePriceLatency(NarrativePriceLatencyRule),
    /// Chaos circuit breaker.
    ChaosCircuitBreaker(ChaosCircuitBreakerRule),
}

macro_rules! dispatch {
    ($self:ident, $rule:ident => $body:expr) => {
        match $self {
            Self::CoherenceThreshold($rule) => $body,
            Self::NarrativeAcceleration($rule) => $body,
            Self::StructuralAlignment($rule) => $body,
            Self::IntentionEligibility($rule) => $body,
            Self::NarrativePriceLatency($rule) => $body,
            Self::ChaosCircuitBreaker($rule) => $body,
        }
    };
}

impl DecisionRule {
    /// Stable identifier.
    #[must_use]
    pub fn name(&self) -> &'static str {
        dispatch!(self, rule => rule.name())
    }

    /// Authority class.
    #[must_use]
    pub fn category(&self) -> RuleCategory {
        dispatch!(self, rule => rule.category())
    }

    /// Evaluate against one state.
    #[must_use]
    pub fn evaluate(&self, state: &MarketState) -> RuleResult {
        dispatch!(self, rule => rule.evaluate(state))
    }
}

macro_rules! impl_from_rule {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for DecisionRule {
                fn from(rule: $ty) -> Self {
                    Self::$variant(rule)
                }
            }
        )*
    };
}

impl_from_rule! {
    CoherenceThreshold => CoherenceThresholdRule,
    NarrativeAcceleration => NarrativeAccelerationRule,
    StructuralAlignment => StructuralAlignmentRule,
    IntentionEligibility => IntentionEligibilityRule,
    NarrativePriceLatency => NarrativePriceLatencyRule,
    ChaosCircuitBreaker => ChaosCircuitBreakerRule,
}
