//! Five-scalar macro stress inputs.

use serde::{Deserialize, Serialize};

/// Independent stress readings, each conventionally in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemicInputs {
    /// Speed of portfolio/market drawdown.
    pub drawdown_velocity: f64,
    /// Funding and market-depth stress.
    pub liquidity_stress: f64,
    /// Cross-asset correlation spike.
    pub correlation_spike: f64,
    /// Narrative shock intensity.
    pub narrative_shock: f64,
    /// Structural break confirmation.
    pub structural_confirmation: f64,
}

impl SystemicInputs {
    /// Field names in [`Self::values`] order.
    pub const FIELDS: [&'static str; 5] = [
        "drawdown_velocity",
        "liquidity_stress",
        "correlation_spike",
        "narrative_shock",
        "structural_confirmation",
    ];

    /// Create inputs.
    #[must_use]
    pub const fn new(
        drawdown_velocity: f64,
        liquidity_stress: f64,
        correlation_spike: f64,
        narrative_shock: f64,
        structural_confirmation: f64,
    ) -> Self {
        Self {
            drawdown_velocity,
            liquidity_stress,
            correlation_spike,
            narrative_shock,
            structural_confirmation,
        }
    }

    /// All readings at zero.
    #[must_use]
    pub const fn calm() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Every reading set to `value`.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value, value)
    }

    /// Readings in [`Self::FIELDS`] order.
    #[must_use]
    pub const fn values(&self) -> [f64; 5] {
        [
            self.drawdown_velocity,
            self.liquidity_stress,
            self.correlation_spike,
            self.narrative_shock,
            self.structural_confirmation,
        ]
    }

    /// Names of readings that are NaN.
    #[must_use]
    pub fn unreadable(&self) -> Vec<&'static str> {
        Self::FIELDS
            .into_iter()
            .zip(self.values())
            .filter_map(|(name, value)| value.is_nan().then_some(name))
            .collect()
    }

    /// Clamp to [0, 1]; NaN reads as maximum stress.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let clean = |v: f64| if v.is_nan() { 1.0 } else { v.clamp(0.0, 1.0) };
        Self::new(
            clean(self.drawdown_velocity),
            clean(self.liquidity_stress),
            clean(self.correlation_spike),
            clean(self.narrative_shock),
            clean(self.structural_confirmation),
        )
    }

    /// Unweighted mean of the five readings.
    #[must_use]
    pub fn composite(&self) -> f64 {
        self.values().iter().sum::<f64>() / 5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_is_unweighted_mean() {
        let inputs = SystemicInputs::new(1.0, 0.5, 0.0, 0.0, 0.0);
        assert!((inputs.composite() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn sanitized_clamps_and_treats_nan_as_max() {
        let inputs = SystemicInputs::new(f64::NAN, -0.5, 1.7, f64::INFINITY, 0.4).sanitized();
        assert_eq!(inputs.values(), [1.0, 0.0, 1.0, 1.0, 0.4]);
    }

    #[test]
    fn unreadable_lists_nan_fields() {
        let inputs = SystemicInputs::new(0.1, f64::NAN, 0.2, 0.3, f64::NAN);
        assert_eq!(inputs.unreadable(), vec!["liquidity_stress", "structural_confirmation"]);
        assert!(SystemicInputs::uniform(2.0).unreadable().is_empty());
    }

    #[test]
    fn deserialize_requires_every_field() {
        let partial = r#"{"drawdown_velocity":0.1,"liquidity_stress":0.1}"#;
        assert!(serde_json::from_str::<SystemicInputs>(partial).is_err());
    }
}
