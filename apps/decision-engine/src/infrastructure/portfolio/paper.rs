//! Paper portfolio: an in-memory ledger for replay and paper trading.
//!
//! Fills open whole positions (no averaging in), marks update market value
//! and unrealized P&L, closes realize P&L into cash. Equity is always
//! `cash + total market value`.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::application::ports::{PositionCloseError, PositionCloser};
use crate::domain::execution::{
    CapitalSnapshot, OrderIntent, OrderSide, Position, PositionSide, PositionSnapshot,
};
use crate::domain::shared::Symbol;

/// Fill rejected by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortfolioError {
    /// Symbol already has an open position.
    #[error("Position already open for {symbol}")]
    AlreadyHeld {
        /// Symbol.
        symbol: String,
    },

    /// Fill price or quantity not positive.
    #[error("Invalid fill for {symbol}: {message}")]
    InvalidFill {
        /// Symbol.
        symbol: String,
        /// Details.
        message: String,
    },
}

#[derive(Debug)]
struct Ledger {
    capital: CapitalSnapshot,
    positions: BTreeMap<Symbol, Position>,
}

impl Ledger {
    fn exposure(&self) -> Decimal {
        self.positions.values().map(|p| p.market_value).sum()
    }

    fn refresh_capital(&mut self) {
        let exposure = self.exposure();
        self.capital.total_exposure = exposure;
        self.capital.account_equity = self.capital.cash + exposure;
        self.capital.open_positions_count = self.positions.len();
    }
}

/// Thread-safe paper ledger.
#[derive(Debug)]
pub struct PaperPortfolio {
    ledger: RwLock<Ledger>,
}

impl PaperPortfolio {
    /// Start from `capital` with nothing held.
    #[must_use]
    pub fn new(capital: CapitalSnapshot) -> Self {
        Self {
            ledger: RwLock::new(Ledger {
                capital,
                positions: BTreeMap::new(),
            }),
        }
    }

    /// Capital snapshot.
    #[must_use]
    pub fn capital(&self) -> CapitalSnapshot {
        self.ledger.read().capital.clone()
    }

    /// Position snapshot.
    #[must_use]
    pub fn positions(&self) -> PositionSnapshot {
        PositionSnapshot::from_positions(self.ledger.read().positions.values().cloned())
    }

    /// Book a fill of `order` at `price`.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::AlreadyHeld`] if the symbol is open and
    /// [`PortfolioError::InvalidFill`] for a non-positive price or quantity.
    pub fn apply_fill(&self, order: &OrderIntent, price: Decimal) -> Result<(), PortfolioError> {
        if price <= Decimal::ZERO || order.quantity <= Decimal::ZERO {
            return Err(PortfolioError::InvalidFill {
                symbol: order.symbol.to_string(),
                message: format!("price={price} quantity={}", order.quantity),
            });
        }

        let mut ledger = self.ledger.write();
        if ledger.positions.contains_key(&order.symbol) {
            return Err(PortfolioError::AlreadyHeld {
                symbol: order.symbol.to_string(),
            });
        }

        let notional = order.quantity * price;
        ledger.capital.cash -= notional;
        ledger.capital.buying_power -= notional;
        ledger.positions.insert(
            order.symbol.clone(),
            Position {
                symbol: order.symbol.clone(),
                quantity: order.quantity,
                average_entry_price: price,
                market_value: notional,
                unrealized_pnl: Decimal::ZERO,
                side: match order.side {
                    OrderSide::Buy => PositionSide::Long,
                    OrderSide::Sell => PositionSide::Short,
                },
            },
        );
        ledger.refresh_capital();
        tracing::info!(symbol = %order.symbol, quantity = %order.quantity, %price, "Paper fill booked");
        Ok(())
    }

    /// Re-mark held positions. Symbols without a price keep their last mark.
    pub fn mark_to_market(&self, prices: &BTreeMap<Symbol, Decimal>) {
        let mut ledger = self.ledger.write();
        for (symbol, position) in &mut ledger.positions {
            if let Some(&price) = prices.get(symbol) {
                position.market_value = position.quantity * price;
                position.unrealized_pnl = (price - position.average_entry_price) * position.quantity;
            }
        }
        ledger.refresh_capital();
    }

    /// Close `symbol` at `price`, returning realized P&L.
    ///
    /// # Errors
    ///
    /// Returns [`PositionCloseError::NotHeld`] if nothing is open.
    pub fn close_at(&self, symbol: &Symbol, price: Decimal) -> Result<Decimal, PositionCloseError> {
        let mut ledger = self.ledger.write();
        let Some(position) = ledger.positions.remove(symbol) else {
            return Err(PositionCloseError::NotHeld {
                symbol: symbol.to_string(),
            });
        };
        let exit_value = position.quantity * price;
        let realized = exit_value - position.quantity * position.average_entry_price;
        ledger.capital.cash += exit_value;
        ledger.capital.buying_power += exit_value;
        ledger.refresh_capital();
        tracing::info!(%symbol, %price, %realized, "Paper position closed");
        Ok(realized)
    }
}

impl PositionCloser for PaperPortfolio {
    fn open_symbols(&self) -> Vec<Symbol> {
        self.ledger.read().positions.keys().cloned().collect()
    }

    /// Closes at the last marked price.
    fn close_position(&self, symbol: &Symbol) -> Result<(), PositionCloseError> {
        let mark = {
            let ledger = self.ledger.read();
            let position = ledger.positions.get(symbol).ok_or_else(|| PositionCloseError::NotHeld {
                symbol: symbol.to_string(),
            })?;
            position
                .market_value
                .checked_div(position.quantity)
                .unwrap_or(position.average_entry_price)
        };
        self.close_at(symbol, mark).map(|_| ())
    }
}
