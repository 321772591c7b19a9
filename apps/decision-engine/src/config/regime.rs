//! Systemic regime thresholds.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::domain::regime::{HardInterruptThresholds, RegimeThresholds, SystemicMonitor};

/// Composite thresholds and hard-interrupt levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegimeConfig {
    /// STRESSED threshold.
    #[serde(default = "default_stressed")]
    pub stressed: f64,
    /// PRE_SYSTEMIC threshold.
    #[serde(default = "default_pre_systemic")]
    pub pre_systemic: f64,
    /// SYSTEMIC threshold.
    #[serde(default = "default_systemic")]
    pub systemic: f64,
    /// Per-input hard-interrupt levels; `null` disables one.
    #[serde(default)]
    pub hard_interrupt: HardInterruptConfig,
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            stressed: default_stressed(),
            pre_systemic: default_pre_systemic(),
            systemic: default_systemic(),
            hard_interrupt: HardInterruptConfig::default(),
        }
    }
}

/// Hard-interrupt levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HardInterruptConfig {
    /// Drawdown velocity level.
    #[serde(default = "default_drawdown")]
    pub drawdown_velocity: Option<f64>,
    /// Liquidity stress level.
    #[serde(default = "default_liquidity")]
    pub liquidity_stress: Option<f64>,
    /// Correlation spike level.
    #[serde(default = "default_correlation")]
    pub correlation_spike: Option<f64>,
    /// Narrative shock level.
    #[serde(default)]
    pub narrative_shock: Option<f64>,
    /// Structural confirmation level.
    #[serde(default)]
    pub structural_confirmation: Option<f64>,
}

impl Default for HardInterruptConfig {
    fn default() -> Self {
        Self {
            drawdown_velocity: default_drawdown(),
            liquidity_stress: default_liquidity(),
            correlation_spike: default_correlation(),
            narrative_shock: None,
            structural_confirmation: None,
        }
    }
}

impl RegimeConfig {
    /// Composite thresholds.
    #[must_use]
    pub const fn to_thresholds(&self) -> RegimeThresholds {
        RegimeThresholds {
            stressed: self.stressed,
            pre_systemic: self.pre_systemic,
            systemic: self.systemic,
        }
    }

    /// Hard-interrupt thresholds.
    #[must_use]
    pub const fn to_hard_interrupts(&self) -> HardInterruptThresholds {
        let h = &self.hard_interrupt;
        HardInterruptThresholds {
            drawdown_velocity: h.drawdown_velocity,
            liquidity_stress: h.liquidity_stress,
            correlation_spike: h.correlation_spike,
            narrative_shock: h.narrative_shock,
            structural_confirmation: h.structural_confirmation,
        }
    }

    /// Monitor built from these thresholds.
    #[must_use]
    pub const fn to_monitor(&self) -> SystemicMonitor {
        SystemicMonitor::new(self.to_thresholds(), self.to_hard_interrupts())
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        self.to_thresholds()
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("regime: {e}")))?;
        self.to_hard_interrupts()
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("regime.hard_interrupt: {e}")))
    }
}

const fn default_stressed() -> f64 {
    0.55
}

const fn default_pre_systemic() -> f64 {
    0.70
}

const fn default_systemic() -> f64 {
    0.85
}

#[allow(clippy::unnecessary_wraps)]
const fn default_drawdown() -> Option<f64> {
    Some(0.95)
}

#[allow(clippy::unnecessary_wraps)]
const fn default_liquidity() -> Option<f64> {
    Some(0.98)
}

#[allow(clippy::unnecessary_wraps)]
const fn default_correlation() -> Option<f64> {
    Some(0.97)
}
