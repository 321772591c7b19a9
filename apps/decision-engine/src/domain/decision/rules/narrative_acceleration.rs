//! Narrative acceleration (INTENT).

use super::Rule;
use crate::domain::decision::value_objects::{MarketState, RuleCategory, RuleResult};

/// Requests a trade when a structured narrative is accelerating and
/// forward-looking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrativeAccelerationRule {
    min_acceleration: f64,
}

impl NarrativeAccelerationRule {
    /// Rule identifier.
    pub const NAME: &'static str = "narrative_acceleration";

    /// Create with a minimum acceleration score (exclusive).
    #[must_use]
    pub const fn new(min_acceleration: f64) -> Self {
        Self { min_acceleration }
    }
}

impl Default for NarrativeAccelerationRule {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Rule for NarrativeAccelerationRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Intent
    }

    fn evaluate(&self, state: &MarketState) -> RuleResult {
        let Some(context) = state.narrative_context() else {
            return RuleResult::abstain(Self::NAME, self.category(), "NARRATIVE_CONTEXT_ABSENT");
        };

        let acceleration = context.acceleration_score;
        if !acceleration.is_finite() {
            return RuleResult::abstain(Self::NAME, self.category(), "ACCELERATION_UNDEFINED");
        }

        let forward = context.mentions_future > context.mentions_current;
        let triggered = acceleration > self.min_acceleration && forward;
        let reason = format!(
            "acceleration={acceleration:.2} future={} current={}",
            context.mentions_future, context.mentions_current
        );
        RuleResult::evaluated(Self::NAME, self.category(), triggered, reason).with_score(acceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::value_objects::NarrativeContext;
    use crate::domain::shared::Timestamp;

    fn state(context: Option<NarrativeContext>) -> MarketState {
        let builder = MarketState::builder("TEST", "test", Timestamp::from_unix_seconds(0).unwrap());
        match context {
            Some(c) => builder.with_narrative_context(c).build(),
            None => builder.build(),
        }
    }

    #[test]
    fn abstains_without_context() {
        let result = NarrativeAccelerationRule::default().evaluate(&state(None));
        assert!(!result.is_triggered());
        assert_eq!(result.reason(), "NARRATIVE_CONTEXT_ABSENT");
    }

    #[test]
    fn triggers_on_forward_acceleration() {
        let result = NarrativeAccelerationRule::default().evaluate(&state(Some(NarrativeContext {
            acceleration_score: 0.7,
            mentions_future: 4,
            mentions_current: 1,
        })));
        assert!(result.requests_trade());
        assert_eq!(result.score_delta(), Some(0.7));
    }

    #[test]
    fn present_tense_narrative_does_not_trigger() {
        let result = NarrativeAccelerationRule::default().evaluate(&state(Some(NarrativeContext {
            acceleration_score: 0.9,
            mentions_future: 2,
            mentions_current: 2,
        })));
        assert!(!result.is_triggered());
    }

    #[test]
    fn threshold_is_exclusive() {
        let result = NarrativeAccelerationRule::default().evaluate(&state(Some(NarrativeContext {
            acceleration_score: 0.5,
            mentions_future: 3,
            mentions_current: 0,
        })));
        assert!(!result.is_triggered());
    }
}
