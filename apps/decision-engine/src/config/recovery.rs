//! Capital recovery ramp configuration.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::domain::regime::CapitalRecoveryController;

/// Ramp back to full size after a systemic episode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Size cap on the first cycle after release.
    #[serde(default = "default_start_cap")]
    pub start_cap: f64,
    /// Cycles to reach full size.
    #[serde(default = "default_steps")]
    pub steps: u32,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            start_cap: default_start_cap(),
            steps: default_steps(),
        }
    }
}

impl RecoveryConfig {
    /// Build the controller.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] unless `0 < start_cap <= 1`
    /// and `steps > 0`.
    pub fn to_controller(&self) -> Result<CapitalRecoveryController, ConfigError> {
        CapitalRecoveryController::new(self.start_cap, self.steps)
            .map_err(|e| ConfigError::ValidationError(format!("recovery: {e}")))
    }
}

const fn default_start_cap() -> f64 {
    0.25
}

const fn default_steps() -> u32 {
    5
}
