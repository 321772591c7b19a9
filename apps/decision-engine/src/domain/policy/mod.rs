//! Policy Bounded Context
//!
//! Resolves a rule trace and the market-capacity gate into one permission
//! posture. The [`PolicyEvaluator`] enforces the authority hierarchy
//! (gate > protection > constraint > intent); a single pluggable
//! [`Policy`] then shapes the posture for verdicts that survive it.

pub mod policies;
pub mod services;
pub mod value_objects;

pub use policies::{
    AuthorityPolicy, ConservativePolicy, IntentExecutionPolicy, LiquidityConstraintPolicy,
    ObservationOnlyPolicy, Policy, PolicyContext,
};
pub use services::{PolicyEngine, PolicyEvaluator, PolicyVerdict, format_policy_explanation};
pub use value_objects::{PolicyAction, PolicyResult};
