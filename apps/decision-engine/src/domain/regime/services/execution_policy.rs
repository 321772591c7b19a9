//! Regime → base execution directive.

use crate::domain::execution::{ExecutionDirective, RiskLevel};
use crate::domain::regime::value_objects::SystemicMode;

/// Maps a regime onto the base directive before gate and multiplier
/// overrides are applied.
pub trait RegimeExecutionPolicy: Send + Sync {
    /// Base directive for `mode`.
    fn directive_for(&self, mode: SystemicMode) -> ExecutionDirective;
}

/// Standard regime table.
///
/// | Regime | Entries | Multiplier | Risk level |
/// |--------|---------|------------|------------|
/// | NORMAL | yes | 1.0 | normal |
/// | STRESSED | yes | 1.0 | cautious |
/// | PRE_SYSTEMIC | yes | 0.5 | elevated |
/// | SYSTEMIC | no | 0.0 | systemic_lockdown |
/// | STANDBY | no | 0.0 | capital_preservation |
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRegimeExecutionPolicy;

impl RegimeExecutionPolicy for DefaultRegimeExecutionPolicy {
    fn directive_for(&self, mode: SystemicMode) -> ExecutionDirective {
        match mode {
            SystemicMode::Normal => ExecutionDirective::new(true, 1.0, RiskLevel::Normal),
            SystemicMode::Stressed => ExecutionDirective::new(true, 1.0, RiskLevel::Cautious),
            SystemicMode::PreSystemic => ExecutionDirective::new(true, 0.5, RiskLevel::Elevated),
            SystemicMode::Systemic => {
                ExecutionDirective::new(false, 0.0, RiskLevel::SystemicLockdown)
            }
            SystemicMode::Standby => {
                ExecutionDirective::new(false, 0.0, RiskLevel::CapitalPreservation)
            }
        }
    }
}
