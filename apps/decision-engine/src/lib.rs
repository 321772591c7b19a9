// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Decision Engine - Rust Core Library
//!
//! Deterministic decision and risk core for intention-metric trading signals.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure business logic
//!   - `decision`: Market state, categorized rules, registry, kernel, market gate
//!   - `policy`: Permission policies, evaluator, policy engine
//!   - `regime`: Systemic monitor, thresholds, recovery ramp, domain modifier
//!   - `execution`: Capital and position ledgers, order intents, sizing engine
//!
//! - **Application**: Orchestration
//!   - `ports`: `MacroSource`, `AuditSink`, `PositionCloser`, `DecisionStore`
//!   - `services`: regime `Orchestrator`, `TradeCoordinator`
//!
//! - **Infrastructure**: Adapters
//!   - `macro_sources`: live, replay and injected macro inputs
//!   - `audit`: JSONL and in-memory regime audit sinks
//!   - `persistence`: latest-decision stores
//!   - `portfolio`: paper portfolio
//!   - `telemetry`: tracing subscriber setup
//!
//! - **Config**: YAML configuration with environment variable interpolation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Orchestration and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Configuration loading and validation.
pub mod config;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::decision::{DecisionKernel, DecisionResult, DecisionType, MarketGate, MarketState};
pub use domain::execution::{
    CapitalSnapshot, ExecutionDirective, OrderIntent, PositionSnapshot, SizingDecision,
    SizingEngine,
};
pub use domain::policy::{PolicyAction, PolicyEngine, PolicyResult};
pub use domain::regime::{SystemicInputs, SystemicMode, SystemicMonitor};
pub use domain::shared::{Symbol, Timestamp};

// Application re-exports
pub use application::ports::{AuditSink, DecisionStore, MacroSource, PositionCloser};
pub use application::services::{CycleReport, Orchestrator, TradeCoordinator, TradeInput};

// Infrastructure re-exports
pub use infrastructure::audit::{InMemoryAuditSink, JsonlAuditWriter};
pub use infrastructure::macro_sources::{InjectedMacroSource, LiveMacroSource, ReplayMacroSource};
