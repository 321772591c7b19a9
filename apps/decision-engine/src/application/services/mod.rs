//! Application Services

mod orchestrator;
mod trade_coordinator;

pub use orchestrator::{
    CycleDiagnostics, CycleReport, Orchestrator, OrchestratorBuilder, OrchestratorError,
};
pub use trade_coordinator::{CoordinatedCycle, TradeCoordinator, TradeInput};
