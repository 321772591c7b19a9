//! Trade Coordinator
//!
//! Joins the decision pipeline with the regime feedback loop:
//! orchestrator cycle → decision kernel → market gate → policy engine →
//! sizing engine. Adds no authority of its own; each stage can only narrow
//! what the previous one allowed.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use super::orchestrator::{CycleReport, Orchestrator, OrchestratorError};
use crate::application::ports::DecisionStore;
use crate::domain::decision::{
    DecisionKernel, DecisionResult, MarketGate, MarketGateResult, MarketState,
};
use crate::domain::execution::{
    CapitalSnapshot, PositionSnapshot, SizingDecision, SizingEngine, SizingRequest,
};
use crate::domain::policy::{PolicyEngine, PolicyResult, format_policy_explanation};

/// Per-symbol inputs for one coordinated cycle.
#[derive(Debug, Clone, Copy)]
pub struct TradeInput<'a> {
    /// State under evaluation.
    pub state: &'a MarketState,
    /// Capital ledger.
    pub capital: &'a CapitalSnapshot,
    /// Position ledger.
    pub positions: &'a PositionSnapshot,
    /// Current price from the oracle.
    pub price: Option<Decimal>,
    /// Optional protective stop.
    pub stop: Option<Decimal>,
}

/// Full trace of one coordinated cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CoordinatedCycle {
    /// Regime cycle.
    pub regime: CycleReport,
    /// Rule trace and aggregate.
    pub decision: DecisionResult,
    /// Market capacity gate.
    pub gate: MarketGateResult,
    /// Permission posture.
    pub permission: PolicyResult,
    /// Human-readable permission summary.
    pub explanation: String,
    /// Sizing outcome.
    pub sizing: SizingDecision,
}

/// Runs the whole pipeline for one symbol per call.
pub struct TradeCoordinator {
    orchestrator: Orchestrator,
    kernel: DecisionKernel,
    gate: MarketGate,
    policy: PolicyEngine,
    sizing: SizingEngine,
    store: Option<Arc<dyn DecisionStore>>,
}

impl TradeCoordinator {
    /// Create a coordinator.
    #[must_use]
    pub fn new(
        orchestrator: Orchestrator,
        kernel: DecisionKernel,
        gate: MarketGate,
        policy: PolicyEngine,
        sizing: SizingEngine,
    ) -> Self {
        Self {
            orchestrator,
            kernel,
            gate,
            policy,
            sizing,
            store: None,
        }
    }

    /// Persist the latest decision after every cycle.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn DecisionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The owned orchestrator.
    #[must_use]
    pub const fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Run one coordinated cycle.
    ///
    /// # Errors
    ///
    /// Propagates [`OrchestratorError`]; nothing is evaluated or persisted
    /// when the regime cycle fails.
    pub fn run(&mut self, input: &TradeInput<'_>) -> Result<CoordinatedCycle, OrchestratorError> {
        let regime = self.orchestrator.run_cycle()?;

        let decision = self.kernel.evaluate(input.state);
        let gate = self.gate.confirm(input.state);
        let permission = self.policy.evaluate(input.state, decision.rule_results(), &gate);
        let explanation = format_policy_explanation(&permission);

        let sizing = self.sizing.evaluate(&SizingRequest {
            permission: &permission,
            state: input.state,
            capital: input.capital,
            positions: input.positions,
            price: input.price,
            stop: input.stop,
            directive: Some(&regime.execution),
        });

        if let Some(store) = &self.store
            && let Err(e) = store.save(&decision)
        {
            tracing::warn!(symbol = %decision.symbol(), error = %e, "Failed to persist decision");
        }

        tracing::info!(
            symbol = %input.state.symbol(),
            regime = %regime.regime,
            decision = %decision.decision(),
            permission = %permission.action,
            ordered = sizing.order().is_some(),
            "Coordinated cycle"
        );

        Ok(CoordinatedCycle {
            regime,
            decision,
            gate,
            permission,
            explanation,
            sizing,
        })
    }
}
