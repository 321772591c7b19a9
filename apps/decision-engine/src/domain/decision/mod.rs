//! Decision Bounded Context
//!
//! Turns one immutable [`MarketState`] into an explainable
//! [`DecisionResult`]: every registered rule is evaluated in category order
//! (INTENT → HYBRID → CONSTRAINT → PROTECTION) and the trace is aggregated
//! with override > block > request precedence.

pub mod rules;
pub mod services;
pub mod value_objects;

pub use rules::{DecisionRule, Rule};
pub use services::{DecisionKernel, MarketGate, MarketGateResult, RuleRegistry};
pub use value_objects::{
    DecisionResult, DecisionType, LatencyCoupling, MarketCapacity, MarketState,
    MarketStateBuilder, NarrativeContext, Provenance, RuleCategory, RuleResult,
};
