//! Chaos circuit breaker (PROTECTION).

use super::Rule;
use crate::domain::decision::value_objects::{MarketState, RuleCategory, RuleResult};

/// Override token emitted when chaos reaches the halt level.
pub const CHAOS_HALT: &str = "CHAOS_HALT";

/// Overrides every other rule when chaos is extreme or unreadable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaosCircuitBreakerRule {
    halt_level: f64,
}

impl ChaosCircuitBreakerRule {
    /// Rule identifier.
    pub const NAME: &'static str = "chaos_circuit_breaker";

    /// Create with the chaos level (inclusive) that trips the breaker.
    #[must_use]
    pub const fn new(halt_level: f64) -> Self {
        Self { halt_level }
    }
}

impl Default for ChaosCircuitBreakerRule {
    fn default() -> Self {
        Self::new(0.95)
    }
}

impl Rule for ChaosCircuitBreakerRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Protection
    }

    fn evaluate(&self, state: &MarketState) -> RuleResult {
        let chaos = state.chaos();
        if !chaos.is_finite() {
            return RuleResult::override_with(Self::NAME, CHAOS_HALT, "CHAOS_UNREADABLE");
        }
        if chaos >= self.halt_level {
            return RuleResult::override_with(
                Self::NAME,
                CHAOS_HALT,
                format!("chaos={chaos:.2} ≥ {:.2}", self.halt_level),
            );
        }
        RuleResult::abstain(Self::NAME, self.category(), "CHAOS_WITHIN_LIMITS")
    }
}
