//! Regime Bounded Context
//!
//! Classifies macro stress into a [`SystemicMode`] and derives the sizing
//! feedback that flows into execution: the stateless [`SystemicMonitor`],
//! the [`CapitalRecoveryController`] ramp, the domain-risk seam and the
//! regime → directive table.

pub mod events;
pub mod services;
pub mod value_objects;

pub use events::RegimeTransitionEvent;
pub use services::{
    CapitalRecoveryController, DefaultRegimeExecutionPolicy, DomainRiskModifier,
    NeutralDomainModifier, RecoveryStatus, RegimeExecutionPolicy, SystemicMonitor,
};
pub use value_objects::{
    HardInterruptThresholds, MacroSourceType, RegimeAssessment, RegimeThresholds, RiskDirective,
    SystemicInputs, SystemicMode,
};
