//! Domain-aware coherence threshold (INTENT).
//!
//! Blends the three intention metrics into one coherence figure
//!
//! ```text
//! coherence = intention^alpha * coherence^beta * (1 - chaos)^gamma
//! ```
//!
//! and requests a trade when it reaches the domain's threshold. Each domain
//! weights the metrics differently; unknown domains use the default profile.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Rule;
use crate::domain::decision::value_objects::{MarketState, RuleCategory, RuleResult};

/// Exponents and threshold for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainProfile {
    /// Exponent on narrative-intention strength.
    pub alpha: f64,
    /// Exponent on coherence.
    pub beta: f64,
    /// Exponent on (1 - chaos).
    pub gamma: f64,
    /// Minimum blended coherence to trigger.
    pub threshold: f64,
}

impl DomainProfile {
    /// Create a profile.
    #[must_use]
    pub const fn new(alpha: f64, beta: f64, gamma: f64, threshold: f64) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            threshold,
        }
    }

    /// Blend metrics with this profile's exponents.
    #[must_use]
    pub fn blend(&self, intention: f64, coherence: f64, chaos: f64) -> f64 {
        intention.powf(self.alpha) * coherence.powf(self.beta) * (1.0 - chaos).powf(self.gamma)
    }
}

impl Default for DomainProfile {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 0.60)
    }
}

/// Built-in domain profiles.
#[must_use]
pub fn standard_profiles() -> BTreeMap<String, DomainProfile> {
    [
        ("ai", DomainProfile::new(1.3, 1.1, 0.8, 0.45)),
        ("biotech", DomainProfile::new(1.0, 1.4, 1.2, 0.55)),
        ("defense", DomainProfile::new(0.9, 1.6, 1.3, 0.65)),
        ("crypto", DomainProfile::new(1.5, 0.9, 1.8, 0.60)),
        ("financials", DomainProfile::new(0.8, 1.5, 1.4, 0.60)),
        ("consumer", DomainProfile::new(0.7, 1.2, 1.1, 0.70)),
    ]
    .into_iter()
    .map(|(domain, profile)| (domain.to_string(), profile))
    .collect()
}

/// Coherence threshold rule.
#[derive(Debug, Clone, PartialEq)]
pub struct CoherenceThresholdRule {
    default_profile: DomainProfile,
    profiles: BTreeMap<String, DomainProfile>,
}

impl CoherenceThresholdRule {
    /// Rule identifier.
    pub const NAME: &'static str = "coherence_threshold";

    /// Create with an explicit default profile and per-domain table.
    #[must_use]
    pub fn new(default_profile: DomainProfile, profiles: BTreeMap<String, DomainProfile>) -> Self {
        Self {
            default_profile,
            profiles: profiles
                .into_iter()
                .map(|(domain, p)| (domain.to_lowercase(), p))
                .collect(),
        }
    }

    /// Add or replace the profile for `domain`.
    #[must_use]
    pub fn with_profile(mut self, domain: impl Into<String>, profile: DomainProfile) -> Self {
        self.profiles.insert(domain.into().to_lowercase(), profile);
        self
    }

    /// Profile applied to `domain`.
    #[must_use]
    pub fn profile_for(&self, domain: &str) -> &DomainProfile {
        self.profiles.get(domain).unwrap_or(&self.default_profile)
    }
}

impl Default for CoherenceThresholdRule {
    fn default() -> Self {
        Self::new(DomainProfile::default(), standard_profiles())
    }
}

impl Rule for CoherenceThresholdRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Intent
    }

    fn evaluate(&self, state: &MarketState) -> RuleResult {
        if !state.metrics_in_range() {
            return RuleResult::abstain(Self::NAME, self.category(), "METRICS_OUT_OF_RANGE");
        }

        let domain = state.domain();
        let profile = self.profile_for(domain);
        let coherence = profile.blend(state.intention(), state.coherence(), state.chaos());
        if !coherence.is_finite() {
            return RuleResult::abstain(Self::NAME, self.category(), "COHERENCE_UNDEFINED");
        }

        let triggered = coherence >= profile.threshold;
        let op = if triggered { "≥" } else { "<" };
        let reason = format!(
            "coherence={coherence:.3} {op} {:.2} (domain={domain})",
            profile.threshold
        );
        RuleResult::evaluated(Self::NAME, self.category(), triggered, reason).with_score(coherence)
    }
}
