//! Capital recovery ramp.
//!
//! After leaving SYSTEMIC or STANDBY for NORMAL, size is capped at a start
//! fraction and released linearly over a fixed number of cycles. Any cycle
//! with the composite back at or above the STRESSED threshold cancels the
//! ramp; the monitor's own multiplier governs from then on.

use serde::{Deserialize, Serialize};

use crate::domain::regime::value_objects::SystemicMode;
use crate::domain::shared::DomainError;

/// Snapshot of the ramp for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoveryStatus {
    /// Whether a ramp is in progress.
    pub active: bool,
    /// Completed ramp steps.
    pub step: u32,
    /// Steps to full size.
    pub steps: u32,
    /// Current modifier.
    pub modifier: f64,
}

/// Ramp state. Single owner, updated once per cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CapitalRecoveryController {
    start_cap: f64,
    steps: u32,
    active: bool,
    step: u32,
}

impl CapitalRecoveryController {
    /// Create a controller.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidValue`] unless `0 < start_cap <= 1`
    /// and `steps > 0`.
    pub fn new(start_cap: f64, steps: u32) -> Result<Self, DomainError> {
        if !(start_cap > 0.0 && start_cap <= 1.0) {
            return Err(DomainError::invalid_value("start_cap", "must be in (0, 1]"));
        }
        if steps == 0 {
            return Err(DomainError::invalid_value("steps", "must be positive"));
        }
        Ok(Self {
            start_cap,
            steps,
            active: false,
            step: 0,
        })
    }

    /// Feed one cycle's transition.
    pub fn update(
        &mut self,
        previous: SystemicMode,
        current: SystemicMode,
        composite: f64,
        stressed_threshold: f64,
    ) {
        if previous.is_suppressed() && current == SystemicMode::Normal {
            self.active = true;
            self.step = 0;
            tracing::info!(start_cap = self.start_cap, steps = self.steps, "Recovery ramp started");
        } else if composite.is_nan() || composite >= stressed_threshold {
            if self.active {
                tracing::info!(composite, "Recovery ramp reset by renewed stress");
            }
            self.reset();
        } else if self.active && self.step < self.steps {
            self.step += 1;
        }
    }

    /// Cancel any ramp.
    pub const fn reset(&mut self) {
        self.active = false;
        self.step = 0;
    }

    /// Current size modifier in [start_cap, 1].
    #[must_use]
    pub fn modifier(&self) -> f64 {
        if !self.active {
            return 1.0;
        }
        let progress = f64::from(self.step) / f64::from(self.steps);
        (1.0 - self.start_cap).mul_add(progress, self.start_cap)
    }

    /// Whether a ramp is holding size below full.
    #[must_use]
    pub const fn is_ramping(&self) -> bool {
        self.active && self.step < self.steps
    }

    /// Diagnostic snapshot.
    #[must_use]
    pub fn status(&self) -> RecoveryStatus {
        RecoveryStatus {
            active: self.active,
            step: self.step,
            steps: self.steps,
            modifier: self.modifier(),
        }
    }
}

impl Default for CapitalRecoveryController {
    fn default() -> Self {
        Self {
            start_cap: 0.25,
            steps: 5,
            active: false,
            step: 0,
        }
    }
}
