//! Rule registry configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::domain::decision::RuleRegistry;
use crate::domain::decision::rules::{
    ChaosCircuitBreakerRule, CoherenceThresholdRule, DecisionRule, DomainProfile,
    IntentionEligibilityRule, NarrativeAccelerationRule, NarrativePriceLatencyRule,
    StructuralAlignmentRule, standard_profiles,
};

/// Which rules run and with what parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rule names to register, in any order.
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,
    /// Coherence threshold rule.
    #[serde(default)]
    pub coherence: CoherenceRuleConfig,
    /// Narrative acceleration rule.
    #[serde(default)]
    pub narrative_acceleration: NarrativeAccelerationConfig,
    /// Structural alignment rule.
    #[serde(default)]
    pub structural_alignment: StructuralAlignmentConfig,
    /// Intention eligibility rule.
    #[serde(default)]
    pub intention_eligibility: IntentionEligibilityConfig,
    /// Narrative/price latency rule.
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Chaos circuit breaker.
    #[serde(default)]
    pub chaos: ChaosConfig,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            coherence: CoherenceRuleConfig::default(),
            narrative_acceleration: NarrativeAccelerationConfig::default(),
            structural_alignment: StructuralAlignmentConfig::default(),
            intention_eligibility: IntentionEligibilityConfig::default(),
            latency: LatencyConfig::default(),
            chaos: ChaosConfig::default(),
        }
    }
}

impl RulesConfig {
    /// Build the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an unknown or repeated
    /// rule name.
    pub fn to_registry(&self) -> Result<RuleRegistry, ConfigError> {
        let mut registry = RuleRegistry::new();
        for name in &self.enabled {
            let rule = self.rule(name)?;
            registry
                .register(rule)
                .map_err(|e| ConfigError::ValidationError(format!("rules.enabled: {e}")))?;
        }
        Ok(registry)
    }

    fn rule(&self, name: &str) -> Result<DecisionRule, ConfigError> {
        let rule: DecisionRule = match name {
            CoherenceThresholdRule::NAME => CoherenceThresholdRule::new(
                self.coherence.default_profile,
                self.coherence.profiles.clone(),
            )
            .into(),
            NarrativeAccelerationRule::NAME => {
                NarrativeAccelerationRule::new(self.narrative_acceleration.min_acceleration).into()
            }
            StructuralAlignmentRule::NAME => StructuralAlignmentRule::new(
                self.structural_alignment.min_alignment,
                self.structural_alignment.breakdown_floor,
            )
            .into(),
            IntentionEligibilityRule::NAME => IntentionEligibilityRule::new(
                self.intention_eligibility.min_intention,
                self.intention_eligibility.min_coherence,
                self.intention_eligibility.max_chaos,
            )
            .into(),
            NarrativePriceLatencyRule::NAME => NarrativePriceLatencyRule::new(
                self.latency.window_seconds,
                self.latency.min_price_delta,
                self.latency.min_volume_ratio,
            )
            .into(),
            ChaosCircuitBreakerRule::NAME => ChaosCircuitBreakerRule::new(self.chaos.halt_level).into(),
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "rules.enabled: unknown rule '{other}'"
                )));
            }
        };
        Ok(rule)
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        let unit = [
            ("rules.coherence.default_profile.threshold", self.coherence.default_profile.threshold),
            ("rules.narrative_acceleration.min_acceleration", self.narrative_acceleration.min_acceleration),
            ("rules.structural_alignment.min_alignment", self.structural_alignment.min_alignment),
            ("rules.structural_alignment.breakdown_floor", self.structural_alignment.breakdown_floor),
            ("rules.intention_eligibility.min_intention", self.intention_eligibility.min_intention),
            ("rules.intention_eligibility.min_coherence", self.intention_eligibility.min_coherence),
            ("rules.intention_eligibility.max_chaos", self.intention_eligibility.max_chaos),
            ("rules.chaos.halt_level", self.chaos.halt_level),
        ];
        for (name, value) in unit {
            super::require_unit(name, value)?;
        }
        for (domain, profile) in &self.coherence.profiles {
            super::require_unit(&format!("rules.coherence.profiles.{domain}.threshold"), profile.threshold)?;
        }
        let window = self.latency.window_seconds;
        if window.is_nan() || window <= 0.0 {
            return Err(ConfigError::ValidationError(
                "rules.latency.window_seconds must be positive".to_string(),
            ));
        }
        if self.structural_alignment.breakdown_floor >= self.structural_alignment.min_alignment {
            return Err(ConfigError::ValidationError(
                "rules.structural_alignment.breakdown_floor must be below min_alignment".to_string(),
            ));
        }
        Ok(())
    }
}

/// Coherence threshold parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoherenceRuleConfig {
    /// Profile for domains without their own.
    #[serde(default)]
    pub default_profile: DomainProfile,
    /// Per-domain profiles, keyed by lowercase domain tag.
    #[serde(default = "standard_profiles")]
    pub profiles: BTreeMap<String, DomainProfile>,
}

impl Default for CoherenceRuleConfig {
    fn default() -> Self {
        Self {
            default_profile: DomainProfile::default(),
            profiles: standard_profiles(),
        }
    }
}

/// Narrative acceleration parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NarrativeAccelerationConfig {
    /// Minimum acceleration score.
    #[serde(default = "default_min_acceleration")]
    pub min_acceleration: f64,
}

impl Default for NarrativeAccelerationConfig {
    fn default() -> Self {
        Self {
            min_acceleration: default_min_acceleration(),
        }
    }
}

/// Structural alignment parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StructuralAlignmentConfig {
    /// Mean level at or above which the rule requests a trade.
    #[serde(default = "default_min_alignment")]
    pub min_alignment: f64,
    /// Any level below this blocks.
    #[serde(default = "default_breakdown_floor")]
    pub breakdown_floor: f64,
}

impl Default for StructuralAlignmentConfig {
    fn default() -> Self {
        Self {
            min_alignment: default_min_alignment(),
            breakdown_floor: default_breakdown_floor(),
        }
    }
}

/// Intention eligibility parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IntentionEligibilityConfig {
    /// Minimum intention.
    #[serde(default = "default_min_intention")]
    pub min_intention: f64,
    /// Minimum coherence.
    #[serde(default = "default_min_coherence")]
    pub min_coherence: f64,
    /// Maximum chaos.
    #[serde(default = "default_max_chaos")]
    pub max_chaos: f64,
}

impl Default for IntentionEligibilityConfig {
    fn default() -> Self {
        Self {
            min_intention: default_min_intention(),
            min_coherence: default_min_coherence(),
            max_chaos: default_max_chaos(),
        }
    }
}

/// Narrative/price latency parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Seconds after ignition within which the market must respond.
    #[serde(default = "default_window_seconds")]
    pub window_seconds: f64,
    /// Minimum absolute price displacement.
    #[serde(default = "default_min_price_delta")]
    pub min_price_delta: f64,
    /// Minimum volume ratio versus baseline.
    #[serde(default = "default_min_volume_ratio")]
    pub min_volume_ratio: f64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            min_price_delta: default_min_price_delta(),
            min_volume_ratio: default_min_volume_ratio(),
        }
    }
}

/// Chaos circuit breaker parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChaosConfig {
    /// Chaos at or above which trading halts.
    #[serde(default = "default_halt_level")]
    pub halt_level: f64,
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self {
            halt_level: default_halt_level(),
        }
    }
}

fn default_enabled() -> Vec<String> {
    [
        CoherenceThresholdRule::NAME,
        NarrativeAccelerationRule::NAME,
        StructuralAlignmentRule::NAME,
        IntentionEligibilityRule::NAME,
        NarrativePriceLatencyRule::NAME,
        ChaosCircuitBreakerRule::NAME,
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

const fn default_min_acceleration() -> f64 {
    0.5
}

const fn default_min_alignment() -> f64 {
    0.70
}

const fn default_breakdown_floor() -> f64 {
    0.20
}

const fn default_min_intention() -> f64 {
    0.20
}

const fn default_min_coherence() -> f64 {
    0.30
}

const fn default_max_chaos() -> f64 {
    0.60
}

const fn default_window_seconds() -> f64 {
    300.0
}

const fn default_min_price_delta() -> f64 {
    0.01
}

const fn default_min_volume_ratio() -> f64 {
    1.2
}

const fn default_halt_level() -> f64 {
    0.95
}
