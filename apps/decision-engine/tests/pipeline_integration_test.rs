//! Decision Pipeline Integration Tests
//!
//! Market state fixtures flowing through the rule kernel, market gate,
//! policy engine and sizing engine, alone and under the regime
//! orchestrator via the trade coordinator.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use decision_engine::application::ports::DecisionStore;
use decision_engine::application::services::{Orchestrator, TradeCoordinator, TradeInput};
use decision_engine::config::load_config_from_string;
use decision_engine::domain::decision::{DecisionKernel, DecisionType, MarketGate, MarketState};
use decision_engine::domain::execution::{
    CapitalSnapshot, DeclineReason, PositionSnapshot, SizingEngine, SizingRequest,
};
use decision_engine::domain::policy::{
    AuthorityPolicy, ConservativePolicy, PolicyAction, PolicyEngine,
};
use decision_engine::domain::regime::SystemicInputs;
use decision_engine::domain::shared::{FrozenClock, Symbol, Timestamp};
use decision_engine::infrastructure::macro_sources::InjectedMacroSource;
use decision_engine::infrastructure::persistence::InMemoryDecisionStore;
use decision_engine::infrastructure::portfolio::PaperPortfolio;
use rust_decimal_macros::dec;

/// Load a market state fixture.
fn load_state(name: &str) -> MarketState {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(name);

    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()));

    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {e}", path.display()))
}

fn account() -> CapitalSnapshot {
    CapitalSnapshot::cash_account(dec!(100000), dec!(0.02))
}

fn coordinator(stress: f64) -> TradeCoordinator {
    let source = InjectedMacroSource::new(SystemicInputs::uniform(stress)).unwrap();
    let orchestrator = Orchestrator::builder(Box::new(source))
        .clock(Arc::new(FrozenClock::new(
            Timestamp::from_unix_seconds(1_767_623_400).unwrap(),
        )))
        .build();
    TradeCoordinator::new(
        orchestrator,
        DecisionKernel::default(),
        MarketGate::default(),
        PolicyEngine::new(Box::new(AuthorityPolicy)),
        SizingEngine::default(),
    )
}

// ============================================
// Fixture Loading
// ============================================

#[test]
fn test_load_market_state_fixture() {
    let state = load_state("nvda_ai_state.json");
    assert_eq!(state.symbol(), &Symbol::new("NVDA"));
    assert_eq!(state.domain(), "ai");
    assert_eq!(state.fractal_levels().len(), 2);
    assert!(state.metrics_in_range());
}

// ============================================
// Kernel → Gate → Policy → Sizing
// ============================================

#[test]
fn test_strong_ai_state_sizes_by_stop_distance() {
    let state = load_state("nvda_ai_state.json");
    let decision = DecisionKernel::default().evaluate(&state);
    assert_eq!(decision.decision(), DecisionType::AllowBuy);
    assert!(decision.triggered_rules().contains(&"coherence_threshold"));

    let gate = MarketGate::default().confirm(&state);
    assert!(gate.confirmed);

    let permission =
        PolicyEngine::new(Box::new(AuthorityPolicy)).evaluate(&state, decision.rule_results(), &gate);
    assert_eq!(permission.action, PolicyAction::Allow);

    let capital = account();
    let positions = PositionSnapshot::empty();
    let sizing = SizingEngine::default().evaluate(&SizingRequest {
        permission: &permission,
        state: &state,
        capital: &capital,
        positions: &positions,
        price: Some(dec!(50)),
        stop: Some(dec!(45)),
        directive: None,
    });
    let order = sizing.order().expect("order sized");
    assert_eq!(order.symbol, Symbol::new("NVDA"));
    assert_eq!(order.quantity, dec!(400));
}

#[test]
fn test_thin_market_is_blocked_despite_intent() {
    let state = load_state("nvda_ai_state.json")
        .to_builder()
        .with_liquidity(0.05)
        .build();
    let decision = DecisionKernel::default().evaluate(&state);
    let gate = MarketGate::default().confirm(&state);
    assert!(!gate.confirmed);

    let permission =
        PolicyEngine::new(Box::new(AuthorityPolicy)).evaluate(&state, decision.rule_results(), &gate);
    assert_eq!(permission.action, PolicyAction::Block);
    assert!(permission.gating_reasons.iter().any(|r| r.starts_with("LIQUIDITY_INSUFFICIENT")));
}

#[test]
fn test_chaos_halt_overrides_everything() {
    let state = load_state("nvda_ai_state.json")
        .to_builder()
        .with_chaos(0.97)
        .build();
    let decision = DecisionKernel::default().evaluate(&state);
    assert_eq!(decision.decision(), DecisionType::Overridden);

    let gate = MarketGate::default().confirm(&state);
    let permission = PolicyEngine::new(Box::new(ConservativePolicy))
        .evaluate(&state, decision.rule_results(), &gate);
    assert_eq!(permission.action, PolicyAction::Overridden);
}

#[test]
fn test_evaluation_is_deterministic() {
    let state = load_state("nvda_ai_state.json");
    let kernel = DecisionKernel::default();
    let first = kernel.evaluate(&state);
    let second = kernel.evaluate(&state);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.observed_at(), state.observed_at());
}

#[test]
fn test_pipeline_from_yaml_config() {
    let yaml = r"
rules:
  enabled: [chaos_circuit_breaker, coherence_threshold]
policy:
  kind: observation_only
sizing:
  quantity_precision: 2
";
    let config = load_config_from_string(yaml).unwrap();
    let kernel = DecisionKernel::new(config.rules.to_registry().unwrap());
    assert_eq!(kernel.registry().len(), 2);

    let state = load_state("nvda_ai_state.json");
    let decision = kernel.evaluate(&state);
    assert_eq!(decision.decision(), DecisionType::AllowBuy);

    let gate = config.market_gate.to_market_gate().confirm(&state);
    let permission = config
        .policy
        .to_policy_engine()
        .evaluate(&state, decision.rule_results(), &gate);
    assert_eq!(permission.action, PolicyAction::Hold);
}

// ============================================
// Trade Coordinator
// ============================================

#[test]
fn test_coordinator_calm_regime_orders_then_declines_held_symbol() {
    let state = load_state("nvda_ai_state.json");
    let portfolio = PaperPortfolio::new(account());
    let store = Arc::new(InMemoryDecisionStore::new());
    let mut c = coordinator(0.05).with_store(store.clone());

    let capital = portfolio.capital();
    let positions = portfolio.positions();
    let first = c
        .run(&TradeInput {
            state: &state,
            capital: &capital,
            positions: &positions,
            price: Some(dec!(50)),
            stop: Some(dec!(45)),
        })
        .unwrap();
    let order = first.sizing.order().expect("first cycle orders");
    assert_eq!(order.quantity, dec!(400));
    portfolio.apply_fill(order, dec!(50)).unwrap();

    let capital = portfolio.capital();
    let positions = portfolio.positions();
    let second = c
        .run(&TradeInput {
            state: &state,
            capital: &capital,
            positions: &positions,
            price: Some(dec!(50)),
            stop: Some(dec!(45)),
        })
        .unwrap();
    assert_eq!(second.sizing.decline_reason(), Some(&DeclineReason::AlreadyHeld));

    let latest = store.load_latest().unwrap().expect("decision persisted");
    assert_eq!(latest.symbol(), &Symbol::new("NVDA"));
    assert_eq!(c.orchestrator().cycles(), 2);
}

#[test]
fn test_coordinator_stressed_regime_scales_size() {
    let state = load_state("nvda_ai_state.json");
    let capital = account();
    let positions = PositionSnapshot::empty();
    // Composite 0.75 is PRE_SYSTEMIC, which blocks entries.
    let mut c = coordinator(0.75);
    let cycle = c
        .run(&TradeInput {
            state: &state,
            capital: &capital,
            positions: &positions,
            price: Some(dec!(50)),
            stop: Some(dec!(45)),
        })
        .unwrap();
    assert_eq!(cycle.permission.action, PolicyAction::Allow);
    assert_eq!(
        cycle.sizing.decline_reason(),
        Some(&DeclineReason::EntriesDisallowed)
    );

    // Composite 0.60 is STRESSED: multiplier 1 - 0.05 / 0.30.
    let mut c = coordinator(0.60);
    let cycle = c
        .run(&TradeInput {
            state: &state,
            capital: &capital,
            positions: &positions,
            price: Some(dec!(50)),
            stop: Some(dec!(45)),
        })
        .unwrap();
    let order = cycle.sizing.order().expect("stressed still orders");
    assert!(order.quantity > dec!(333) && order.quantity < dec!(334));
}
