//! Execution Bounded Context
//!
//! Capital-aware sizing of order intents. The [`SizingEngine`] is the only
//! producer of [`OrderIntent`]s; everything else in the crate can at most
//! shrink or veto what it is allowed to size.

pub mod services;
pub mod value_objects;

pub use services::{DeclineReason, SizingDecision, SizingEngine, SizingRequest};
pub use value_objects::{
    CapitalSnapshot, ExecutionDirective, OrderIntent, OrderSide, OrderType, Position,
    PositionSide, PositionSnapshot, RiskLevel,
};
