//! Market-capacity confirmation.
//!
//! A state may carry liquidity, volatility and responsiveness readings.
//! Each present reading must clear its bound; missing readings are not
//! held against the state.

use serde::{Deserialize, Serialize};

use crate::domain::decision::value_objects::MarketState;

/// Outcome of the market-capacity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketGateResult {
    /// Whether the market can absorb a new position.
    pub confirmed: bool,
    /// Failed checks, empty when confirmed.
    pub reasons: Vec<String>,
}

impl MarketGateResult {
    /// A confirmed result.
    #[must_use]
    pub const fn confirmed() -> Self {
        Self {
            confirmed: true,
            reasons: Vec::new(),
        }
    }
}

/// Capacity bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketGate {
    min_liquidity: f64,
    max_volatility: f64,
    min_responsiveness: f64,
}

impl MarketGate {
    /// Create with explicit bounds.
    #[must_use]
    pub const fn new(min_liquidity: f64, max_volatility: f64, min_responsiveness: f64) -> Self {
        Self {
            min_liquidity,
            max_volatility,
            min_responsiveness,
        }
    }

    /// Check the state's capacity readings.
    #[must_use]
    pub fn confirm(&self, state: &MarketState) -> MarketGateResult {
        let capacity = state.capacity();
        let mut reasons = Vec::new();

        if let Some(liquidity) = capacity.liquidity
            && (liquidity.is_nan() || liquidity < self.min_liquidity)
        {
            reasons.push(format!("LIQUIDITY_INSUFFICIENT({liquidity:.2})"));
        }
        if let Some(volatility) = capacity.volatility
            && (volatility.is_nan() || volatility > self.max_volatility)
        {
            reasons.push(format!("VOLATILITY_EXCESSIVE({volatility:.2})"));
        }
        if let Some(responsiveness) = capacity.responsiveness
            && (responsiveness.is_nan() || responsiveness < self.min_responsiveness)
        {
            reasons.push(format!("RESPONSIVENESS_INSUFFICIENT({responsiveness:.2})"));
        }

        if reasons.is_empty() {
            MarketGateResult::confirmed()
        } else {
            tracing::debug!(symbol = %state.symbol(), ?reasons, "Market capacity not confirmed");
            MarketGateResult {
                confirmed: false,
                reasons,
            }
        }
    }
}

impl Default for MarketGate {
    fn default() -> Self {
        Self::new(0.30, 0.70, 0.25)
    }
}
