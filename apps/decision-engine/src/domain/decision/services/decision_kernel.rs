//! Decision Kernel.
//!
//! Runs the registry against one state and aggregates the trace.

use super::rule_registry::RuleRegistry;
use crate::domain::decision::value_objects::{DecisionResult, MarketState};

/// Evaluates a fixed rule registry against market states.
#[derive(Debug, Clone)]
pub struct DecisionKernel {
    registry: RuleRegistry,
}

impl DecisionKernel {
    /// Create a kernel over `registry`.
    #[must_use]
    pub const fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// The rules this kernel evaluates.
    #[must_use]
    pub const fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Evaluate every rule and aggregate.
    ///
    /// The result is a pure function of `state`: no clock is read, so the
    /// same state always yields an identical `DecisionResult`.
    #[must_use]
    pub fn evaluate(&self, state: &MarketState) -> DecisionResult {
        let results = self.registry.evaluate_all(state);
        let decision = DecisionResult::from_results(state.symbol().clone(), state.observed_at(), results);

        tracing::debug!(
            symbol = %decision.symbol(),
            decision = %decision.decision(),
            triggered = ?decision.triggered_rules(),
            blocks = ?decision.block_reasons(),
            "Decision evaluated"
        );

        decision
    }
}

impl Default for DecisionKernel {
    fn default() -> Self {
        Self::new(RuleRegistry::standard())
    }
}
