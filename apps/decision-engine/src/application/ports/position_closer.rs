//! Position Closer Port (Driven Port)
//!
//! Used by the orchestrator to flatten the book on a systemic rupture.

use crate::domain::shared::Symbol;

/// Close failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionCloseError {
    /// Nothing held for the symbol.
    #[error("No open position for {symbol}")]
    NotHeld {
        /// Symbol.
        symbol: String,
    },

    /// Downstream rejected the close.
    #[error("Close rejected for {symbol}: {message}")]
    Rejected {
        /// Symbol.
        symbol: String,
        /// Details.
        message: String,
    },
}

/// Port for closing open positions.
#[cfg_attr(test, mockall::automock)]
pub trait PositionCloser: Send + Sync {
    /// Symbols with open positions.
    fn open_symbols(&self) -> Vec<Symbol>;

    /// Close the whole position in `symbol`.
    fn close_position(&self, symbol: &Symbol) -> Result<(), PositionCloseError>;
}

/// Holds nothing and closes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPositionCloser;

impl PositionCloser for NoOpPositionCloser {
    fn open_symbols(&self) -> Vec<Symbol> {
        Vec::new()
    }

    fn close_position(&self, symbol: &Symbol) -> Result<(), PositionCloseError> {
        Err(PositionCloseError::NotHeld {
            symbol: symbol.to_string(),
        })
    }
}
