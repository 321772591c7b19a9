//! Domain-risk scaling seam.

use crate::domain::regime::value_objects::{SystemicInputs, SystemicMode};

/// Extra size scaling applied after the monitor and recovery ramp.
pub trait DomainRiskModifier: Send + Sync {
    /// Multiplier in [0, 1] for this cycle.
    fn modifier(&self, inputs: &SystemicInputs, mode: SystemicMode) -> f64;
}

/// Leaves size unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralDomainModifier;

impl DomainRiskModifier for NeutralDomainModifier {
    fn modifier(&self, _inputs: &SystemicInputs, _mode: SystemicMode) -> f64 {
        1.0
    }
}
