//! Narrative-to-price latency coupling (CONSTRAINT).
//!
//! After a narrative "ignition" the market has a fixed window to confirm
//! it with both price displacement and volume. Inside the window with both
//! thresholds met the rule passes; anything else inside or past the window
//! blocks. With no ignition recorded there is nothing to confirm and the
//! rule abstains.

use super::Rule;
use crate::domain::decision::value_objects::{MarketState, RuleCategory, RuleResult};

/// Latency coupling thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrativePriceLatencyRule {
    window_seconds: f64,
    min_price_delta: f64,
    min_volume_ratio: f64,
}

impl NarrativePriceLatencyRule {
    /// Rule identifier.
    pub const NAME: &'static str = "narrative_price_latency";

    /// Create with explicit window and thresholds. All bounds are inclusive.
    #[must_use]
    pub const fn new(window_seconds: f64, min_price_delta: f64, min_volume_ratio: f64) -> Self {
        Self {
            window_seconds,
            min_price_delta,
            min_volume_ratio,
        }
    }
}

impl Default for NarrativePriceLatencyRule {
    fn default() -> Self {
        Self::new(300.0, 0.01, 1.2)
    }
}

impl Rule for NarrativePriceLatencyRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Constraint
    }

    fn evaluate(&self, state: &MarketState) -> RuleResult {
        let latency = state.latency();
        let Some(ignition) = latency.ignition_time else {
            return RuleResult::abstain(Self::NAME, self.category(), "IGNITION_ABSENT");
        };

        let (Some(now), Some(price_delta), Some(volume_ratio)) =
            (latency.engine_time, latency.price_delta, latency.volume_ratio)
        else {
            return RuleResult::abstain(Self::NAME, self.category(), "LATENCY_DATA_INCOMPLETE");
        };

        if ![ignition, now, price_delta, volume_ratio]
            .iter()
            .all(|v| v.is_finite())
        {
            return RuleResult::block(Self::NAME, self.category(), "INVALID_LATENCY");
        }

        let elapsed = now - ignition;
        if elapsed < 0.0 {
            return RuleResult::block(Self::NAME, self.category(), "INVALID_LATENCY");
        }
        if elapsed > self.window_seconds {
            return RuleResult::block(Self::NAME, self.category(), "LATENCY_WINDOW_EXCEEDED");
        }

        // Displacement is directional: a narrative that moves price the wrong
        // way has not been confirmed.
        if price_delta >= self.min_price_delta && volume_ratio >= self.min_volume_ratio {
            RuleResult::trigger(Self::NAME, self.category(), "COUPLING_CONFIRMED")
        } else {
            RuleResult::block(Self::NAME, self.category(), "LATENCY_FAIL")
        }
    }
}
