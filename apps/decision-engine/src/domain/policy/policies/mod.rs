//! Pluggable permission policies.
//!
//! Exactly one policy is applied per evaluation. A policy only ever sees
//! verdicts that survived the hard gates (market capacity, overrides,
//! blocks); [`PolicyEngine`](super::services::PolicyEngine) resolves those
//! before delegating.

mod authority;
mod conservative;
mod intent_execution;
mod liquidity_constraint;
mod observation_only;

pub use authority::AuthorityPolicy;
pub use conservative::ConservativePolicy;
pub use intent_execution::IntentExecutionPolicy;
pub use liquidity_constraint::LiquidityConstraintPolicy;
pub use observation_only::ObservationOnlyPolicy;

use super::services::PolicyVerdict;
use super::value_objects::PolicyResult;
use crate::domain::decision::MarketState;

/// Inputs visible to a policy.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    /// Evaluator verdict for this state.
    pub verdict: &'a PolicyVerdict,
    /// The state under evaluation.
    pub state: &'a MarketState,
}

/// A permission policy.
pub trait Policy: Send + Sync {
    /// Stable policy name recorded on every result.
    fn name(&self) -> &'static str;

    /// Produce a permission posture.
    fn apply(&self, ctx: &PolicyContext<'_>) -> PolicyResult;
}
