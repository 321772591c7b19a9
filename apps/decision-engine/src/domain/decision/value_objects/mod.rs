//! Decision value objects.

mod decision_result;
mod market_state;
mod rule_result;

pub use decision_result::{DecisionResult, DecisionType};
pub use market_state::{
    LatencyCoupling, MarketCapacity, MarketState, MarketStateBuilder, NarrativeContext, Provenance,
};
pub use rule_result::{RuleCategory, RuleResult};
