//! Execution value objects.

mod capital_snapshot;
mod execution_directive;
mod order_intent;
mod position;

pub use capital_snapshot::CapitalSnapshot;
pub use execution_directive::{ExecutionDirective, RiskLevel};
pub use order_intent::{OrderIntent, OrderSide, OrderType};
pub use position::{Position, PositionSide, PositionSnapshot};
