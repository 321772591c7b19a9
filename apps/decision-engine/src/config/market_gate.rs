//! Market capacity gate configuration.

use serde::{Deserialize, Serialize};

use crate::domain::decision::MarketGate;

/// Liquidity, volatility and responsiveness bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketGateConfig {
    /// Minimum liquidity.
    #[serde(default = "default_min_liquidity")]
    pub min_liquidity: f64,
    /// Maximum volatility.
    #[serde(default = "default_max_volatility")]
    pub max_volatility: f64,
    /// Minimum responsiveness.
    #[serde(default = "default_min_responsiveness")]
    pub min_responsiveness: f64,
}

impl Default for MarketGateConfig {
    fn default() -> Self {
        Self {
            min_liquidity: default_min_liquidity(),
            max_volatility: default_max_volatility(),
            min_responsiveness: default_min_responsiveness(),
        }
    }
}

impl MarketGateConfig {
    /// Convert to the domain gate.
    #[must_use]
    pub const fn to_market_gate(&self) -> MarketGate {
        MarketGate::new(self.min_liquidity, self.max_volatility, self.min_responsiveness)
    }
}

const fn default_min_liquidity() -> f64 {
    0.30
}

const fn default_max_volatility() -> f64 {
    0.70
}

const fn default_min_responsiveness() -> f64 {
    0.25
}
