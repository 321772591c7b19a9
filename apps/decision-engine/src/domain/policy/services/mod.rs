//! Policy services.

mod explanation;
mod policy_engine;
mod policy_evaluator;

pub use explanation::format_policy_explanation;
pub use policy_engine::PolicyEngine;
pub use policy_evaluator::{PolicyEvaluator, PolicyVerdict};
