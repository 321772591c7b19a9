//! Systemic Regime Monitor.
//!
//! Stateless classifier run once per cycle. Two paths run in parallel:
//!
//! - **Hard interrupt**: any single input at or above its extreme level
//!   forces `SYSTEMIC` with flatten, regardless of the average.
//! - **Composite**: the unweighted mean of all five inputs is compared
//!   against rising thresholds.
//!
//! A NaN reading is unreadable, not extreme: it cannot trip the hard
//! interrupt on its own. Such a frame yields `PRE_SYSTEMIC` with entries
//! blocked and a zero multiplier, leaving open positions alone. A real
//! extreme reading in another field still flattens.
//!
//! Between the STRESSED and SYSTEMIC thresholds the size multiplier falls
//! linearly from 1.0 to 0.0, so there is no sizing cliff at either edge.

use crate::domain::regime::value_objects::{
    HardInterruptThresholds, RegimeAssessment, RegimeThresholds, RiskDirective, SystemicInputs,
    SystemicMode,
};

/// Stateless regime classifier.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SystemicMonitor {
    thresholds: RegimeThresholds,
    hard: HardInterruptThresholds,
}

impl SystemicMonitor {
    /// Create a monitor. Thresholds are expected to be validated.
    #[must_use]
    pub const fn new(thresholds: RegimeThresholds, hard: HardInterruptThresholds) -> Self {
        Self { thresholds, hard }
    }

    /// Composite thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> &RegimeThresholds {
        &self.thresholds
    }

    /// Classify and return only the directive.
    #[must_use]
    pub fn evaluate(&self, inputs: &SystemicInputs) -> RiskDirective {
        self.assess(inputs).directive
    }

    /// Classify inputs.
    #[must_use]
    pub fn assess(&self, inputs: &SystemicInputs) -> RegimeAssessment {
        let unreadable = inputs.unreadable();
        let inputs = inputs.sanitized();
        let composite = inputs.composite();
        let tripped: Vec<&str> = self
            .hard
            .tripped(&inputs)
            .into_iter()
            .filter(|name| !unreadable.contains(name))
            .collect();

        if !tripped.is_empty() {
            let directive = RiskDirective {
                mode: SystemicMode::Systemic,
                flatten_all: true,
                block_new_entries: true,
                size_multiplier: 0.0,
                increase_telemetry: true,
                reason: format!("Hard interrupt triggered: {}", tripped.join(", ")),
            };
            return RegimeAssessment {
                directive,
                composite,
                hard_interrupt: true,
                tripped: tripped.into_iter().map(str::to_string).collect(),
            };
        }

        if !unreadable.is_empty() {
            return RegimeAssessment {
                directive: RiskDirective {
                    mode: SystemicMode::PreSystemic,
                    flatten_all: false,
                    block_new_entries: true,
                    size_multiplier: 0.0,
                    increase_telemetry: true,
                    reason: format!("Unreadable macro input: {}", unreadable.join(", ")),
                },
                composite,
                hard_interrupt: false,
                tripped: Vec::new(),
            };
        }

        let t = &self.thresholds;
        let multiplier = self.size_multiplier(composite);
        let directive = if composite >= t.systemic {
            RiskDirective {
                mode: SystemicMode::Systemic,
                flatten_all: true,
                block_new_entries: true,
                size_multiplier: 0.0,
                increase_telemetry: true,
                reason: format!("Composite {composite:.3} ≥ systemic {:.2}", t.systemic),
            }
        } else if composite >= t.pre_systemic {
            RiskDirective {
                mode: SystemicMode::PreSystemic,
                flatten_all: false,
                block_new_entries: true,
                size_multiplier: multiplier,
                increase_telemetry: true,
                reason: format!("Composite {composite:.3} ≥ pre-systemic {:.2}", t.pre_systemic),
            }
        } else if composite >= t.stressed {
            RiskDirective {
                mode: SystemicMode::Stressed,
                flatten_all: false,
                block_new_entries: false,
                size_multiplier: multiplier,
                increase_telemetry: true,
                reason: format!("Composite {composite:.3} ≥ stressed {:.2}", t.stressed),
            }
        } else {
            RiskDirective {
                mode: SystemicMode::Normal,
                flatten_all: false,
                block_new_entries: false,
                size_multiplier: 1.0,
                increase_telemetry: false,
                reason: format!("Composite {composite:.3} below stressed {:.2}", t.stressed),
            }
        };

        RegimeAssessment {
            directive,
            composite,
            hard_interrupt: false,
            tripped: Vec::new(),
        }
    }

    /// Continuous multiplier for a composite score.
    ///
    /// 1.0 below STRESSED, 0.0 at or above SYSTEMIC, linear in between.
    #[must_use]
    pub fn size_multiplier(&self, composite: f64) -> f64 {
        let t = &self.thresholds;
        if composite.is_nan() || composite >= t.systemic {
            return 0.0;
        }
        if composite < t.stressed {
            return 1.0;
        }
        let span = t.systemic - t.stressed;
        (1.0 - (composite - t.stressed) / span).clamp(0.0, 1.0)
    }
}
