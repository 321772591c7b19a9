//! Regime classification thresholds.

use serde::{Deserialize, Serialize};

use super::SystemicInputs;
use crate::domain::shared::DomainError;

/// Rising composite thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeThresholds {
    /// Composite at or above which the regime is at least STRESSED.
    pub stressed: f64,
    /// Composite at or above which new entries are blocked.
    pub pre_systemic: f64,
    /// Composite at or above which everything is flattened.
    pub systemic: f64,
}

impl RegimeThresholds {
    /// Check `0 < stressed < pre_systemic < systemic <= 1`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidValue`] naming the offending bound.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(self.stressed > 0.0 && self.stressed < self.pre_systemic) {
            return Err(DomainError::invalid_value(
                "stressed",
                "must be in (0, pre_systemic)",
            ));
        }
        if self.systemic.is_nan() || self.pre_systemic >= self.systemic {
            return Err(DomainError::invalid_value(
                "pre_systemic",
                "must be below systemic",
            ));
        }
        if self.systemic > 1.0 {
            return Err(DomainError::invalid_value("systemic", "must be at most 1.0"));
        }
        Ok(())
    }
}

impl Default for RegimeThresholds {
    fn default() -> Self {
        Self {
            stressed: 0.55,
            pre_systemic: 0.70,
            systemic: 0.85,
        }
    }
}

/// Per-input extreme levels that trip a hard interrupt. `None` disables
/// the check for that input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardInterruptThresholds {
    /// Drawdown velocity level.
    pub drawdown_velocity: Option<f64>,
    /// Liquidity stress level.
    pub liquidity_stress: Option<f64>,
    /// Correlation spike level.
    pub correlation_spike: Option<f64>,
    /// Narrative shock level.
    pub narrative_shock: Option<f64>,
    /// Structural confirmation level.
    pub structural_confirmation: Option<f64>,
}

impl HardInterruptThresholds {
    /// Names of inputs at or above their level.
    #[must_use]
    pub fn tripped(&self, inputs: &SystemicInputs) -> Vec<&'static str> {
        let levels = [
            self.drawdown_velocity,
            self.liquidity_stress,
            self.correlation_spike,
            self.narrative_shock,
            self.structural_confirmation,
        ];
        SystemicInputs::FIELDS
            .into_iter()
            .zip(levels)
            .zip(inputs.values())
            .filter_map(|((name, level), value)| match level {
                Some(level) if value >= level => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Check every enabled level is in (0, 1].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidValue`] naming the offending input.
    pub fn validate(&self) -> Result<(), DomainError> {
        let levels = [
            self.drawdown_velocity,
            self.liquidity_stress,
            self.correlation_spike,
            self.narrative_shock,
            self.structural_confirmation,
        ];
        for (name, level) in SystemicInputs::FIELDS.into_iter().zip(levels) {
            if let Some(level) = level
                && !(level > 0.0 && level <= 1.0)
            {
                return Err(DomainError::invalid_value(name, "hard interrupt level must be in (0, 1]"));
            }
        }
        Ok(())
    }
}

impl Default for HardInterruptThresholds {
    fn default() -> Self {
        Self {
            drawdown_velocity: Some(0.95),
            liquidity_stress: Some(0.98),
            correlation_spike: Some(0.97),
            narrative_shock: None,
            structural_confirmation: None,
        }
    }
}
