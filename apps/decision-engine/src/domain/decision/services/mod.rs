//! Decision services.

mod decision_kernel;
mod market_gate;
mod rule_registry;

pub use decision_kernel::DecisionKernel;
pub use market_gate::{MarketGate, MarketGateResult};
pub use rule_registry::RuleRegistry;
