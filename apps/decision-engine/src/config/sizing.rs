//! Execution sizing configuration.

use serde::{Deserialize, Serialize};

use crate::domain::execution::{OrderType, SizingEngine};

/// Quantity precision and order type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SizingConfig {
    /// Decimal places kept when truncating quantities.
    #[serde(default = "default_quantity_precision")]
    pub quantity_precision: u32,
    /// Order type on emitted intents.
    #[serde(default)]
    pub order_type: OrderType,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            quantity_precision: default_quantity_precision(),
            order_type: OrderType::default(),
        }
    }
}

impl SizingConfig {
    /// Largest accepted precision.
    pub const MAX_PRECISION: u32 = 12;

    /// Build the engine.
    #[must_use]
    pub const fn to_sizing_engine(&self) -> SizingEngine {
        SizingEngine::new(self.quantity_precision, self.order_type)
    }
}

const fn default_quantity_precision() -> u32 {
    6
}
