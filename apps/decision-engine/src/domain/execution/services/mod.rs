//! Execution services.

mod sizing_engine;

pub use sizing_engine::{DeclineReason, SizingDecision, SizingEngine, SizingRequest};
