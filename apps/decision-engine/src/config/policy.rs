//! Permission policy selection.

use serde::{Deserialize, Serialize};

use crate::domain::policy::{
    AuthorityPolicy, ConservativePolicy, IntentExecutionPolicy, LiquidityConstraintPolicy,
    ObservationOnlyPolicy, Policy, PolicyEngine,
};

/// Built-in policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Mirror the evaluator's verdict.
    #[default]
    Authority,
    /// Allow only on an intent trigger.
    IntentExecution,
    /// Block thin markets.
    LiquidityConstraint,
    /// Scale confidence with trigger count.
    Conservative,
    /// Never allow.
    ObservationOnly,
}

/// Which policy the engine applies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Policy to apply.
    #[serde(default)]
    pub kind: PolicyKind,
    /// Liquidity floor for `liquidity_constraint`.
    #[serde(default = "default_min_liquidity")]
    pub min_liquidity: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            kind: PolicyKind::default(),
            min_liquidity: default_min_liquidity(),
        }
    }
}

impl PolicyConfig {
    /// Instantiate the selected policy.
    #[must_use]
    pub fn to_policy(&self) -> Box<dyn Policy> {
        match self.kind {
            PolicyKind::Authority => Box::new(AuthorityPolicy),
            PolicyKind::IntentExecution => Box::new(IntentExecutionPolicy),
            PolicyKind::LiquidityConstraint => {
                Box::new(LiquidityConstraintPolicy::new(self.min_liquidity))
            }
            PolicyKind::Conservative => Box::new(ConservativePolicy),
            PolicyKind::ObservationOnly => Box::new(ObservationOnlyPolicy),
        }
    }

    /// Engine applying the selected policy.
    #[must_use]
    pub fn to_policy_engine(&self) -> PolicyEngine {
        PolicyEngine::new(self.to_policy())
    }
}

const fn default_min_liquidity() -> f64 {
    0.2
}
