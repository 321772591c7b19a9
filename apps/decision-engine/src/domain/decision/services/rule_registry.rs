//! Category-bucketed rule arena.

use crate::domain::decision::rules::{
    ChaosCircuitBreakerRule, CoherenceThresholdRule, DecisionRule, IntentionEligibilityRule,
    NarrativeAccelerationRule, NarrativePriceLatencyRule, StructuralAlignmentRule,
};
use crate::domain::decision::value_objects::{MarketState, RuleCategory, RuleResult};
use crate::domain::shared::DomainError;

/// Rules grouped by category, iterated INTENT → HYBRID → CONSTRAINT →
/// PROTECTION and in registration order within a category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleRegistry {
    buckets: [Vec<DecisionRule>; 4],
}

impl RuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in rule at its default parameters.
    #[must_use]
    pub fn standard() -> Self {
        let rules: [DecisionRule; 6] = [
            CoherenceThresholdRule::default().into(),
            NarrativeAccelerationRule::default().into(),
            StructuralAlignmentRule::default().into(),
            IntentionEligibilityRule::default().into(),
            NarrativePriceLatencyRule::default().into(),
            ChaosCircuitBreakerRule::default().into(),
        ];
        let mut registry = Self::new();
        for rule in rules {
            registry.buckets[rule.category().rank()].push(rule);
        }
        registry
    }

    /// Register a rule.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidValue`] if a rule with the same name is
    /// already registered.
    pub fn register(&mut self, rule: impl Into<DecisionRule>) -> Result<(), DomainError> {
        let rule = rule.into();
        if self.iter().any(|r| r.name() == rule.name()) {
            return Err(DomainError::invalid_value(
                "rule",
                format!("rule '{}' is already registered", rule.name()),
            ));
        }
        tracing::debug!(rule = rule.name(), category = %rule.category(), "Registered rule");
        self.buckets[rule.category().rank()].push(rule);
        Ok(())
    }

    /// Rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &DecisionRule> {
        RuleCategory::ORDER
            .into_iter()
            .flat_map(move |c| self.buckets[c.rank()].iter())
    }

    /// Rules of one category, in registration order.
    #[must_use]
    pub fn rules_in(&self, category: RuleCategory) -> &[DecisionRule] {
        &self.buckets[category.rank()]
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate every rule, without short-circuiting.
    #[must_use]
    pub fn evaluate_all(&self, state: &MarketState) -> Vec<RuleResult> {
        self.iter().map(|rule| rule.evaluate(state)).collect()
    }
}
