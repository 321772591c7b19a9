//! Decision Engine Binary
//!
//! Replays recorded macro frames through the regime orchestrator. With a
//! market state, each cycle also runs the full decision pipeline against a
//! paper portfolio.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin decision-engine -- --frames frames.json
//! cargo run --bin decision-engine -- --frames frames.json --state nvda.json --price 50 --stop 45
//! ```
//!
//! # Arguments
//!
//! - `--frames PATH`: JSON array of macro frames (overrides `engine.replay_path`)
//! - `--state PATH`: JSON market state to evaluate every cycle
//! - `--price DEC`: current price for sizing
//! - `--stop DEC`: protective stop for sizing
//! - `--equity DEC`: paper account equity (default: 100000)
//! - `--max-risk DEC`: risk fraction per trade (default: 0.01)
//!
//! # Environment Variables
//!
//! - `DECISION_ENGINE_CONFIG`: config file path (default: config.yaml, defaults if absent)
//! - `RUST_LOG`: additional log filter directives

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use decision_engine::application::ports::{AuditSink, DecisionStore};
use decision_engine::application::services::{Orchestrator, TradeCoordinator, TradeInput};
use decision_engine::config::{Config, load_config};
use decision_engine::domain::decision::{DecisionKernel, MarketState};
use decision_engine::domain::execution::CapitalSnapshot;
use decision_engine::infrastructure::audit::{InMemoryAuditSink, JsonlAuditWriter};
use decision_engine::infrastructure::macro_sources::ReplayMacroSource;
use decision_engine::infrastructure::persistence::JsonFileDecisionStore;
use decision_engine::infrastructure::portfolio::PaperPortfolio;
use decision_engine::infrastructure::telemetry::init_tracing;

/// Default config file.
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Command line arguments.
#[derive(Debug, Default)]
struct Args {
    frames: Option<String>,
    state: Option<String>,
    price: Option<Decimal>,
    stop: Option<Decimal>,
    equity: Option<Decimal>,
    max_risk: Option<Decimal>,
}

fn main() -> Result<()> {
    let config = read_config()?;
    init_tracing(&config.observability.logging)?;

    let args = parse_args(std::env::args().skip(1))?;

    let frames_path = args
        .frames
        .clone()
        .or_else(|| config.engine.replay_path.clone())
        .context("no macro frames: pass --frames or set engine.replay_path")?;
    let source = ReplayMacroSource::from_file(&frames_path)?;
    let cycles = config.engine.max_cycles.unwrap_or_else(|| source.len());

    tracing::info!(
        frames = source.len(),
        cycles,
        frames_path = %frames_path,
        policy = ?config.policy.kind,
        "Starting decision engine replay"
    );

    let audit: Arc<dyn AuditSink> = if config.audit.enabled {
        Arc::new(JsonlAuditWriter::open(&config.audit.path)?)
    } else {
        Arc::new(InMemoryAuditSink::new())
    };

    let capital = CapitalSnapshot::cash_account(
        args.equity.unwrap_or(dec!(100000)),
        args.max_risk.unwrap_or(dec!(0.01)),
    );
    let portfolio = Arc::new(PaperPortfolio::new(capital));

    let orchestrator = Orchestrator::builder(Box::new(source))
        .audit_sink(audit)
        .position_closer(portfolio.clone())
        .monitor(config.regime.to_monitor())
        .recovery(config.recovery.to_controller()?)
        .build();

    match &args.state {
        Some(path) => run_pipeline(&config, orchestrator, &portfolio, path, &args, cycles)?,
        None => run_regime_only(orchestrator, cycles)?,
    }

    tracing::info!("Decision engine stopped");
    Ok(())
}

/// Load the config file, falling back to defaults when it does not exist.
fn read_config() -> Result<Config> {
    let path = std::env::var("DECISION_ENGINE_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        return Ok(Config::default());
    }
    load_config(Some(&path)).with_context(|| format!("loading {path}"))
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    while let Some(flag) = raw.next() {
        let value = raw
            .next()
            .with_context(|| format!("missing value for {flag}"))?;
        match flag.as_str() {
            "--frames" => args.frames = Some(value),
            "--state" => args.state = Some(value),
            "--price" => args.price = Some(parse_decimal(&flag, &value)?),
            "--stop" => args.stop = Some(parse_decimal(&flag, &value)?),
            "--equity" => args.equity = Some(parse_decimal(&flag, &value)?),
            "--max-risk" => args.max_risk = Some(parse_decimal(&flag, &value)?),
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn parse_decimal(flag: &str, value: &str) -> Result<Decimal> {
    value
        .parse::<Decimal>()
        .with_context(|| format!("{flag} expects a decimal, got '{value}'"))
}

fn run_regime_only(mut orchestrator: Orchestrator, cycles: usize) -> Result<()> {
    for _ in 0..cycles {
        let report = orchestrator.run_cycle()?;
        tracing::info!(
            sequence = report.sequence,
            regime = %report.regime,
            composite = report.diagnostics.composite,
            allow_entries = report.execution.allow_entries,
            size_multiplier = report.execution.size_multiplier,
            flatten = report.flatten_triggered,
            "Cycle"
        );
    }
    log_audit_health(&orchestrator);
    Ok(())
}

fn run_pipeline(
    config: &Config,
    orchestrator: Orchestrator,
    portfolio: &PaperPortfolio,
    state_path: &str,
    args: &Args,
    cycles: usize,
) -> Result<()> {
    let contents =
        std::fs::read_to_string(state_path).with_context(|| format!("reading {state_path}"))?;
    let state: MarketState =
        serde_json::from_str(&contents).with_context(|| format!("parsing {state_path}"))?;

    let mut coordinator = TradeCoordinator::new(
        orchestrator,
        DecisionKernel::new(config.rules.to_registry()?),
        config.market_gate.to_market_gate(),
        config.policy.to_policy_engine(),
        config.sizing.to_sizing_engine(),
    );
    if config.persistence.enabled {
        let store: Arc<dyn DecisionStore> =
            Arc::new(JsonFileDecisionStore::new(&config.persistence.decision_path)?);
        coordinator = coordinator.with_store(store);
    }

    for _ in 0..cycles {
        let capital = portfolio.capital();
        let positions = portfolio.positions();
        let cycle = coordinator.run(&TradeInput {
            state: &state,
            capital: &capital,
            positions: &positions,
            price: args.price,
            stop: args.stop,
        })?;

        tracing::info!(
            sequence = cycle.regime.sequence,
            regime = %cycle.regime.regime,
            decision = %cycle.decision.decision(),
            permission = %cycle.permission.action,
            explanation = %cycle.explanation,
            "Cycle"
        );

        if let (Some(order), Some(price)) = (cycle.sizing.order(), args.price) {
            portfolio.apply_fill(order, price)?;
            tracing::info!(
                symbol = %order.symbol,
                quantity = %order.quantity,
                %price,
                "Paper fill"
            );
        } else if let Some(reason) = cycle.sizing.decline_reason() {
            tracing::info!(%reason, "No order");
        }
    }

    let capital = portfolio.capital();
    tracing::info!(
        equity = %capital.account_equity,
        cash = %capital.cash,
        positions = portfolio.positions().len(),
        "Final paper portfolio"
    );
    log_audit_health(coordinator.orchestrator());
    Ok(())
}

fn log_audit_health(orchestrator: &Orchestrator) {
    let failed = orchestrator.failed_audit_writes();
    if failed > 0 {
        tracing::error!(failed, "Regime audit writes failed during replay");
    }
    tracing::info!(
        cycles = orchestrator.cycles(),
        regime = %orchestrator.mode(),
        "Replay complete"
    );
}
