//! Account capital snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Read-only capital ledger snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalSnapshot {
    /// Total account equity.
    pub account_equity: Decimal,
    /// Capital available for new purchases.
    pub buying_power: Decimal,
    /// Settled cash.
    pub cash: Decimal,
    /// Gross market value of open positions.
    pub total_exposure: Decimal,
    /// Fraction of equity risked per trade (e.g. 0.02).
    pub max_risk_per_trade: Decimal,
    /// Number of open positions.
    pub open_positions_count: usize,
    /// Whether the account can borrow.
    pub margin_enabled: bool,
}

impl CapitalSnapshot {
    /// Cash-only account with nothing open.
    #[must_use]
    pub const fn cash_account(equity: Decimal, max_risk_per_trade: Decimal) -> Self {
        Self {
            account_equity: equity,
            buying_power: equity,
            cash: equity,
            total_exposure: Decimal::ZERO,
            max_risk_per_trade,
            open_positions_count: 0,
            margin_enabled: false,
        }
    }

    /// Override buying power.
    #[must_use]
    pub const fn with_buying_power(mut self, buying_power: Decimal) -> Self {
        self.buying_power = buying_power;
        self
    }
}
