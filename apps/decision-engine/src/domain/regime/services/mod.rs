//! Regime services.

mod capital_recovery;
mod domain_modifier;
mod execution_policy;
mod systemic_monitor;

pub use capital_recovery::{CapitalRecoveryController, RecoveryStatus};
pub use domain_modifier::{DomainRiskModifier, NeutralDomainModifier};
pub use execution_policy::{DefaultRegimeExecutionPolicy, RegimeExecutionPolicy};
pub use systemic_monitor::SystemicMonitor;
