//! Open positions.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// Direction of a held position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionSide {
    /// Long.
    Long,
    /// Short.
    Short,
}

/// One held position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Instrument.
    pub symbol: Symbol,
    /// Held quantity (positive).
    pub quantity: Decimal,
    /// Volume-weighted entry price.
    pub average_entry_price: Decimal,
    /// Quantity times last marked price.
    pub market_value: Decimal,
    /// Market value minus cost basis.
    pub unrealized_pnl: Decimal,
    /// Direction.
    pub side: PositionSide,
}

/// Read-only snapshot of every held position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Positions by symbol.
    pub positions: BTreeMap<Symbol, Position>,
    /// Sum of market values.
    pub total_market_value: Decimal,
    /// Sum of unrealized P&L.
    pub total_unrealized_pnl: Decimal,
}

impl PositionSnapshot {
    /// Snapshot with nothing held.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from positions, deriving the totals.
    #[must_use]
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Self {
        let positions: BTreeMap<Symbol, Position> = positions
            .into_iter()
            .map(|p| (p.symbol.clone(), p))
            .collect();
        let total_market_value = positions.values().map(|p| p.market_value).sum();
        let total_unrealized_pnl = positions.values().map(|p| p.unrealized_pnl).sum();
        Self {
            positions,
            total_market_value,
            total_unrealized_pnl,
        }
    }

    /// Whether `symbol` is held.
    #[must_use]
    pub fn holds(&self, symbol: &Symbol) -> bool {
        self.positions.contains_key(symbol)
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
