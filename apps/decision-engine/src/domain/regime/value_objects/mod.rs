//! Regime value objects.

mod risk_directive;
mod systemic_inputs;
mod systemic_mode;
mod thresholds;

pub use risk_directive::{RegimeAssessment, RiskDirective};
pub use systemic_inputs::SystemicInputs;
pub use systemic_mode::{MacroSourceType, SystemicMode};
pub use thresholds::{HardInterruptThresholds, RegimeThresholds};
