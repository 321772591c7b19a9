//! Regime Orchestrator
//!
//! Owns the current [`SystemicMode`] and turns one macro frame per cycle
//! into an [`ExecutionDirective`].
//!
//! # Cycle
//!
//! 1. Collect a frame from the [`MacroSource`]. A collection failure aborts
//!    the cycle with no state change.
//! 2. Assess it with the [`SystemicMonitor`].
//! 3. Resolve the regime:
//!    - flatten: close every open position, lock into `STANDBY`
//!    - `STANDBY`: stay locked while the composite is at or above the
//!      STRESSED threshold, otherwise release to `NORMAL`
//!    - otherwise adopt the monitor's mode
//! 4. Advance the [`CapitalRecoveryController`].
//! 5. Apply the [`DomainRiskModifier`].
//! 6. Build the directive from the [`RegimeExecutionPolicy`]: entries are
//!    forced off while the monitor blocks or the lock holds; the multiplier
//!    is `monitor × recovery × domain` clamped to [0, 1].
//!
//! Every actual regime change is written to the [`AuditSink`]. Audit
//! failures are counted and logged but never abort the cycle.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::ports::{
    AuditSink, MacroSource, MacroSourceError, NoOpAuditSink, NoOpPositionCloser, PositionCloser,
};
use crate::domain::execution::ExecutionDirective;
use crate::domain::regime::{
    CapitalRecoveryController, DefaultRegimeExecutionPolicy, DomainRiskModifier, MacroSourceType,
    NeutralDomainModifier, RecoveryStatus, RegimeExecutionPolicy, RegimeThresholds,
    RegimeTransitionEvent, SystemicInputs, SystemicMode, SystemicMonitor,
};
use crate::domain::shared::{Clock, Symbol, SystemClock, Timestamp};

// ============================================================================
// Errors
// ============================================================================

/// Orchestration failure. The orchestrator's state is unchanged when one
/// is returned.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// Macro inputs could not be collected.
    #[error("Macro collection failed: {0}")]
    MacroSource(#[from] MacroSourceError),
}

// ============================================================================
// Report
// ============================================================================

/// Everything the cycle looked at, for operators and the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleDiagnostics {
    /// Sanitized inputs the monitor saw.
    pub inputs: SystemicInputs,
    /// Composite score.
    pub composite: f64,
    /// Composite thresholds in force.
    pub thresholds: RegimeThresholds,
    /// Mode proposed by the monitor before hysteresis.
    pub monitor_mode: SystemicMode,
    /// Monitor's size multiplier.
    pub monitor_multiplier: f64,
    /// Monitor's reason string.
    pub monitor_reason: String,
    /// Whether a hard interrupt fired.
    pub hard_interrupt: bool,
    /// Inputs that tripped a hard interrupt.
    pub tripped: Vec<String>,
    /// Recovery ramp after this cycle.
    pub recovery: RecoveryStatus,
    /// Domain modifier applied.
    pub domain_modifier: f64,
    /// Positions closed by a flatten this cycle.
    pub closed_positions: Vec<Symbol>,
    /// Positions a flatten failed to close.
    pub close_failures: Vec<Symbol>,
    /// Provenance of the inputs.
    pub macro_source_type: MacroSourceType,
}

/// Outcome of one orchestration cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Cycle number, starting at 1.
    pub sequence: u64,
    /// Clock reading for the cycle.
    pub timestamp: Timestamp,
    /// Mode before the cycle.
    pub previous_regime: SystemicMode,
    /// Mode after the cycle.
    pub regime: SystemicMode,
    /// Whether a flatten was executed.
    pub flatten_triggered: bool,
    /// Whether new entries are blocked.
    pub block_new_entries: bool,
    /// Whether the STANDBY lock holds.
    pub hysteresis_locked: bool,
    /// Directive for execution sizing.
    pub execution: ExecutionDirective,
    /// Supporting detail.
    pub diagnostics: CycleDiagnostics,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Regime state machine. Single owner; wrap in a mutex to share.
pub struct Orchestrator {
    source: Box<dyn MacroSource>,
    audit: Arc<dyn AuditSink>,
    closer: Arc<dyn PositionCloser>,
    clock: Arc<dyn Clock>,
    monitor: SystemicMonitor,
    recovery: CapitalRecoveryController,
    domain_modifier: Box<dyn DomainRiskModifier>,
    regime_policy: Box<dyn RegimeExecutionPolicy>,
    mode: SystemicMode,
    sequence: u64,
    failed_audit_writes: u64,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("mode", &self.mode)
            .field("sequence", &self.sequence)
            .field("monitor", &self.monitor)
            .field("recovery", &self.recovery)
            .field("failed_audit_writes", &self.failed_audit_writes)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Start building an orchestrator around `source`.
    #[must_use]
    pub fn builder(source: Box<dyn MacroSource>) -> OrchestratorBuilder {
        OrchestratorBuilder::new(source)
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> SystemicMode {
        self.mode
    }

    /// Cycles completed.
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.sequence
    }

    /// Audit writes that failed since construction.
    #[must_use]
    pub const fn failed_audit_writes(&self) -> u64 {
        self.failed_audit_writes
    }

    /// Recovery ramp state.
    #[must_use]
    pub fn recovery_status(&self) -> RecoveryStatus {
        self.recovery.status()
    }

    /// Run one cycle.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::MacroSource`] if no frame could be
    /// collected; mode, ramp and counters are left untouched.
    pub fn run_cycle(&mut self) -> Result<CycleReport, OrchestratorError> {
        let raw = self.source.collect()?;
        let source_type = self.source.source_type();
        let timestamp = self.clock.now();
        let assessment = self.monitor.assess(&raw);
        let monitor_directive = &assessment.directive;
        let composite = assessment.composite;
        let stressed = self.monitor.thresholds().stressed;

        self.sequence += 1;
        let previous = self.mode;

        let mut closed_positions = Vec::new();
        let mut close_failures = Vec::new();
        let flatten_triggered = monitor_directive.flatten_all;

        let (regime, hysteresis_locked) = if flatten_triggered {
            tracing::warn!(
                reason = %monitor_directive.reason,
                composite,
                "Systemic flatten triggered"
            );
            (closed_positions, close_failures) = self.flatten_all();
            (SystemicMode::Standby, true)
        } else if previous == SystemicMode::Standby {
            if composite >= stressed {
                (SystemicMode::Standby, true)
            } else {
                (SystemicMode::Normal, false)
            }
        } else {
            (monitor_directive.mode, false)
        };

        let block_new_entries = monitor_directive.block_new_entries || hysteresis_locked;

        if regime != previous {
            self.mode = regime;
            tracing::info!(
                from = %previous,
                to = %regime,
                composite,
                hard_interrupt = assessment.hard_interrupt,
                "Regime transition"
            );
            metrics::counter!(
                "regime_transitions_total",
                "from" => previous.as_str(),
                "to" => regime.as_str()
            )
            .increment(1);
            self.audit(&RegimeTransitionEvent {
                timestamp,
                previous_regime: previous,
                new_regime: regime,
                composite_score: composite,
                hard_interrupt: assessment.hard_interrupt,
                block_new_entries,
                hysteresis_locked,
                macro_source_type: source_type,
                injected_mode: source_type.is_injected(),
            });
        }

        self.recovery.update(previous, regime, composite, stressed);

        let domain_modifier = {
            let m = self.domain_modifier.modifier(&raw.sanitized(), regime);
            if m.is_nan() { 0.0 } else { m.clamp(0.0, 1.0) }
        };

        let base = self.regime_policy.directive_for(regime);
        let multiplier =
            monitor_directive.size_multiplier * self.recovery.modifier() * domain_modifier;
        let execution = ExecutionDirective::new(
            base.allow_entries && !block_new_entries,
            multiplier,
            base.risk_level,
        );

        tracing::debug!(
            sequence = self.sequence,
            regime = %regime,
            allow_entries = execution.allow_entries,
            size_multiplier = execution.size_multiplier,
            "Cycle complete"
        );

        Ok(CycleReport {
            sequence: self.sequence,
            timestamp,
            previous_regime: previous,
            regime,
            flatten_triggered,
            block_new_entries,
            hysteresis_locked,
            execution,
            diagnostics: CycleDiagnostics {
                inputs: raw.sanitized(),
                composite,
                thresholds: *self.monitor.thresholds(),
                monitor_mode: monitor_directive.mode,
                monitor_multiplier: monitor_directive.size_multiplier,
                monitor_reason: monitor_directive.reason.clone(),
                hard_interrupt: assessment.hard_interrupt,
                tripped: assessment.tripped.clone(),
                recovery: self.recovery.status(),
                domain_modifier,
                closed_positions,
                close_failures,
                macro_source_type: source_type,
            },
        })
    }

    fn flatten_all(&self) -> (Vec<Symbol>, Vec<Symbol>) {
        let mut closed = Vec::new();
        let mut failed = Vec::new();
        for symbol in self.closer.open_symbols() {
            match self.closer.close_position(&symbol) {
                Ok(()) => {
                    tracing::info!(%symbol, "Position closed by flatten");
                    closed.push(symbol);
                }
                Err(e) => {
                    tracing::error!(%symbol, error = %e, "Flatten failed to close position");
                    failed.push(symbol);
                }
            }
        }
        (closed, failed)
    }

    fn audit(&mut self, event: &RegimeTransitionEvent) {
        if let Err(e) = self.audit.record(event) {
            self.failed_audit_writes += 1;
            metrics::counter!("audit_write_failures_total").increment(1);
            tracing::error!(
                error = %e,
                from = %event.previous_regime,
                to = %event.new_regime,
                failed_total = self.failed_audit_writes,
                "Failed to write regime transition audit"
            );
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`Orchestrator`]. Every collaborator but the macro source
/// has a neutral default.
pub struct OrchestratorBuilder {
    source: Box<dyn MacroSource>,
    audit: Arc<dyn AuditSink>,
    closer: Arc<dyn PositionCloser>,
    clock: Arc<dyn Clock>,
    monitor: SystemicMonitor,
    recovery: CapitalRecoveryController,
    domain_modifier: Box<dyn DomainRiskModifier>,
    regime_policy: Box<dyn RegimeExecutionPolicy>,
}

impl OrchestratorBuilder {
    fn new(source: Box<dyn MacroSource>) -> Self {
        Self {
            source,
            audit: Arc::new(NoOpAuditSink),
            closer: Arc::new(NoOpPositionCloser),
            clock: Arc::new(SystemClock),
            monitor: SystemicMonitor::default(),
            recovery: CapitalRecoveryController::default(),
            domain_modifier: Box::new(NeutralDomainModifier),
            regime_policy: Box::new(DefaultRegimeExecutionPolicy),
        }
    }

    /// Set the audit sink.
    #[must_use]
    pub fn audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Set the position closer used by flatten.
    #[must_use]
    pub fn position_closer(mut self, closer: Arc<dyn PositionCloser>) -> Self {
        self.closer = closer;
        self
    }

    /// Set the clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the monitor.
    #[must_use]
    pub fn monitor(mut self, monitor: SystemicMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    /// Set the recovery controller.
    #[must_use]
    pub fn recovery(mut self, recovery: CapitalRecoveryController) -> Self {
        self.recovery = recovery;
        self
    }

    /// Set the domain modifier.
    #[must_use]
    pub fn domain_modifier(mut self, modifier: Box<dyn DomainRiskModifier>) -> Self {
        self.domain_modifier = modifier;
        self
    }

    /// Set the regime → directive policy.
    #[must_use]
    pub fn regime_policy(mut self, policy: Box<dyn RegimeExecutionPolicy>) -> Self {
        self.regime_policy = policy;
        self
    }

    /// Build, starting in `NORMAL`.
    #[must_use]
    pub fn build(self) -> Orchestrator {
        Orchestrator {
            source: self.source,
            audit: self.audit,
            closer: self.closer,
            clock: self.clock,
            monitor: self.monitor,
            recovery: self.recovery,
            domain_modifier: self.domain_modifier,
            regime_policy: self.regime_policy,
            mode: SystemicMode::Normal,
            sequence: 0,
            failed_audit_writes: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AuditError, MockAuditSink, MockMacroSource, MockPositionCloser, PositionCloseError,
    };
    use crate::domain::execution::RiskLevel;
    use crate::domain::shared::FrozenClock;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Scripted source: pops frames, repeats the last.
    struct Script {
        frames: VecDeque<SystemicInputs>,
        last: SystemicInputs,
    }

    impl Script {
        fn new(values: &[f64]) -> Box<Self> {
            Box::new(Self {
                frames: values.iter().map(|v| SystemicInputs::uniform(*v)).collect(),
                last: SystemicInputs::calm(),
            })
        }
    }

    impl MacroSource for Script {
        fn collect(&mut self) -> Result<SystemicInputs, MacroSourceError> {
            if let Some(frame) = self.frames.pop_front() {
                self.last = frame;
            }
            Ok(self.last)
        }

        fn source_type(&self) -> MacroSourceType {
            MacroSourceType::Injected
        }
    }

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<RegimeTransitionEvent>>);

    impl AuditSink for RecordingSink {
        fn record(&self, event: &RegimeTransitionEvent) -> Result<(), AuditError> {
            self.0.lock().push(event.clone());
            Ok(())
        }
    }

    fn clock() -> Arc<FrozenClock> {
        Arc::new(FrozenClock::new(Timestamp::from_unix_seconds(1_700_000_000).unwrap()))
    }

    fn orchestrator(values: &[f64], sink: Arc<RecordingSink>) -> Orchestrator {
        Orchestrator::builder(Script::new(values))
            .audit_sink(sink)
            .clock(clock())
            .build()
    }

    #[test]
    fn starts_normal() {
        let o = orchestrator(&[], Arc::default());
        assert_eq!(o.mode(), SystemicMode::Normal);
        assert_eq!(o.cycles(), 0);
    }

    #[test]
    fn calm_cycle_allows_full_size_without_audit() {
        let sink = Arc::new(RecordingSink::default());
        let mut o = orchestrator(&[0.0], sink.clone());
        let report = o.run_cycle().unwrap();
        assert_eq!(report.regime, SystemicMode::Normal);
        assert!(report.execution.allow_entries);
        assert_eq!(report.execution.size_multiplier, 1.0);
        assert_eq!(report.execution.risk_level, RiskLevel::Normal);
        assert!(sink.0.lock().is_empty());
    }

    #[test]
    fn hard_interrupt_flattens_and_locks() {
        let mut closer = MockPositionCloser::new();
        closer
            .expect_open_symbols()
            .times(1)
            .returning(|| vec![Symbol::new("AAA"), Symbol::new("BBB")]);
        closer.expect_close_position().times(2).returning(|_| Ok(()));

        let sink = Arc::new(RecordingSink::default());
        let source = Box::new(Script {
            frames: VecDeque::from([SystemicInputs::new(0.96, 0.0, 0.0, 0.0, 0.0)]),
            last: SystemicInputs::calm(),
        });
        let mut o = Orchestrator::builder(source)
            .audit_sink(sink.clone())
            .position_closer(Arc::new(closer))
            .clock(clock())
            .build();

        let report = o.run_cycle().unwrap();
        assert!(report.flatten_triggered);
        assert_eq!(report.regime, SystemicMode::Standby);
        assert!(report.hysteresis_locked);
        assert!(!report.execution.allow_entries);
        assert_eq!(report.execution.size_multiplier, 0.0);
        assert_eq!(report.diagnostics.closed_positions.len(), 2);
        assert!(report.diagnostics.hard_interrupt);

        let events = sink.0.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].new_regime, SystemicMode::Standby);
        assert!(events[0].hysteresis_locked);
        assert!(events[0].injected_mode);
    }

    #[test]
    fn standby_holds_until_composite_below_stressed() {
        let sink = Arc::new(RecordingSink::default());
        let mut o = orchestrator(&[0.90, 0.60, 0.56, 0.40], sink.clone());

        assert_eq!(o.run_cycle().unwrap().regime, SystemicMode::Standby);

        let held = o.run_cycle().unwrap();
        assert_eq!(held.regime, SystemicMode::Standby);
        assert!(held.hysteresis_locked);
        assert!(!held.execution.allow_entries);

        assert_eq!(o.run_cycle().unwrap().regime, SystemicMode::Standby);

        let released = o.run_cycle().unwrap();
        assert_eq!(released.regime, SystemicMode::Normal);
        assert!(!released.hysteresis_locked);
        assert!(released.execution.allow_entries);

        let events = sink.0.lock();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].previous_regime, SystemicMode::Standby);
        assert_eq!(events[1].new_regime, SystemicMode::Normal);
        assert!(!events[1].hysteresis_locked);
    }

    #[test]
    fn repeated_flatten_in_standby_is_not_re_audited() {
        let sink = Arc::new(RecordingSink::default());
        let mut o = orchestrator(&[0.90, 0.95], sink.clone());
        o.run_cycle().unwrap();
        let second = o.run_cycle().unwrap();
        assert!(second.flatten_triggered);
        assert_eq!(sink.0.lock().len(), 1);
    }

    #[test]
    fn recovery_ramp_after_standby() {
        let sink = Arc::new(RecordingSink::default());
        let mut o = orchestrator(&[0.90, 0.40], sink);
        o.run_cycle().unwrap();

        let mut multipliers = Vec::new();
        for _ in 0..7 {
            multipliers.push(o.run_cycle().unwrap().execution.size_multiplier);
        }
        let expected = [0.25, 0.40, 0.55, 0.70, 0.85, 1.0, 1.0];
        for (got, want) in multipliers.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn pre_systemic_blocks_entries_with_elevated_risk() {
        let mut o = orchestrator(&[0.75], Arc::default());
        let report = o.run_cycle().unwrap();
        assert_eq!(report.regime, SystemicMode::PreSystemic);
        assert!(report.block_new_entries);
        assert!(!report.execution.allow_entries);
        assert_eq!(report.execution.risk_level, RiskLevel::Elevated);
    }

    #[test]
    fn stressed_scales_size_but_allows_entries() {
        let mut o = orchestrator(&[0.60], Arc::default());
        let report = o.run_cycle().unwrap();
        assert_eq!(report.regime, SystemicMode::Stressed);
        assert!(report.execution.allow_entries);
        assert!(report.execution.size_multiplier < 1.0);
        assert_eq!(report.execution.risk_level, RiskLevel::Cautious);
    }

    #[test]
    fn audit_failure_is_counted_not_fatal() {
        let mut sink = MockAuditSink::new();
        sink.expect_record().returning(|_| {
            Err(AuditError::Unavailable {
                message: "disk full".to_string(),
            })
        });
        let mut o = Orchestrator::builder(Script::new(&[0.60, 0.0]))
            .audit_sink(Arc::new(sink))
            .clock(clock())
            .build();
        assert!(o.run_cycle().is_ok());
        assert!(o.run_cycle().is_ok());
        assert_eq!(o.failed_audit_writes(), 2);
        assert_eq!(o.mode(), SystemicMode::Normal);
    }

    #[test]
    fn collection_failure_leaves_state_untouched() {
        let mut source = MockMacroSource::new();
        source.expect_collect().returning(|| {
            Err(MacroSourceError::Unavailable {
                message: "feed down".to_string(),
            })
        });
        source.expect_source_type().return_const(MacroSourceType::Live);
        let mut o = Orchestrator::builder(Box::new(source)).clock(clock()).build();
        assert!(matches!(o.run_cycle(), Err(OrchestratorError::MacroSource(_))));
        assert_eq!(o.cycles(), 0);
        assert_eq!(o.mode(), SystemicMode::Normal);
    }

    #[test]
    fn unreadable_frame_blocks_entries_and_keeps_positions() {
        let mut closer = MockPositionCloser::new();
        closer.expect_open_symbols().times(0);
        closer.expect_close_position().times(0);
        let sink = Arc::new(RecordingSink::default());
        let source = Box::new(Script {
            frames: VecDeque::from([SystemicInputs::new(0.1, f64::NAN, 0.1, 0.1, 0.1)]),
            last: SystemicInputs::calm(),
        });
        let mut o = Orchestrator::builder(source)
            .audit_sink(sink.clone())
            .position_closer(Arc::new(closer))
            .clock(clock())
            .build();

        let report = o.run_cycle().unwrap();
        assert!(!report.flatten_triggered);
        assert_eq!(report.regime, SystemicMode::PreSystemic);
        assert!(report.block_new_entries);
        assert!(!report.execution.allow_entries);
        assert_eq!(report.execution.size_multiplier, 0.0);
        assert!(report.diagnostics.closed_positions.is_empty());
        assert!(!report.diagnostics.hard_interrupt);

        let events = sink.0.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].new_regime, SystemicMode::PreSystemic);
        assert!(!events[0].hard_interrupt);
    }

    #[test]
    fn close_failure_is_reported() {
        let mut closer = MockPositionCloser::new();
        closer.expect_open_symbols().returning(|| vec![Symbol::new("AAA")]);
        closer.expect_close_position().returning(|s| {
            Err(PositionCloseError::Rejected {
                symbol: s.to_string(),
                message: "halted".to_string(),
            })
        });
        let mut o = Orchestrator::builder(Script::new(&[0.99]))
            .position_closer(Arc::new(closer))
            .clock(clock())
            .build();
        let report = o.run_cycle().unwrap();
        assert_eq!(report.regime, SystemicMode::Standby);
        assert_eq!(report.diagnostics.close_failures, vec![Symbol::new("AAA")]);
    }

    struct Halving;

    impl DomainRiskModifier for Halving {
        fn modifier(&self, _inputs: &SystemicInputs, _mode: SystemicMode) -> f64 {
            0.5
        }
    }

    #[test]
    fn domain_modifier_scales_multiplier() {
        let mut o = Orchestrator::builder(Script::new(&[0.0]))
            .domain_modifier(Box::new(Halving))
            .clock(clock())
            .build();
        let report = o.run_cycle().unwrap();
        assert_eq!(report.execution.size_multiplier, 0.5);
        assert_eq!(report.diagnostics.domain_modifier, 0.5);
    }

    #[test]
    fn report_uses_injected_clock() {
        let frozen = clock();
        let mut o = Orchestrator::builder(Script::new(&[0.0]))
            .clock(frozen.clone())
            .build();
        frozen.advance(chrono::Duration::seconds(30)).unwrap();
        let report = o.run_cycle().unwrap();
        assert_eq!(report.timestamp, Timestamp::from_unix_seconds(1_700_000_030).unwrap());
        assert_eq!(report.sequence, 1);
    }
}
