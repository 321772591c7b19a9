//! Execution Sizing Engine.
//!
//! The only component allowed to synthesize an order. Pure: never talks to
//! a broker and never reads a clock.
//!
//! # Rejections (checked in order)
//!
//! 1. directive present with `allow_entries = false`
//! 2. permission other than `ALLOW`
//! 3. symbol already held (no averaging in)
//! 4. price missing or not positive
//! 5. risk capital (`equity × max_risk_per_trade × multiplier`) not positive
//!
//! # Sizing
//!
//! - with a stop: `risk_capital / (price − stop)`; requires `0 < stop < price`
//! - without: `min(risk_capital, buying_power) / price`
//!
//! Either way the notional never exceeds buying power.
//!
//! Quantities are truncated toward zero to a fixed number of decimal places;
//! a quantity that truncates to zero is declined.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::decision::MarketState;
use crate::domain::execution::value_objects::{
    CapitalSnapshot, ExecutionDirective, OrderIntent, OrderSide, OrderType, PositionSnapshot,
};
use crate::domain::policy::{PolicyAction, PolicyResult};

/// Why no order was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "reason")]
pub enum DeclineReason {
    /// The regime directive forbids new entries.
    EntriesDisallowed,
    /// The policy did not authorize an entry.
    NotPermitted {
        /// Posture that was received.
        action: PolicyAction,
    },
    /// The symbol is already held.
    AlreadyHeld,
    /// No usable price.
    MissingPrice,
    /// Risk capital was zero or negative.
    NoRiskCapital,
    /// Stop was not strictly between zero and the price.
    InvalidStop,
    /// Computed quantity was not positive after rounding.
    NonPositiveQuantity,
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntriesDisallowed => write!(f, "entries disallowed by regime directive"),
            Self::NotPermitted { action } => write!(f, "policy posture {action} does not permit entry"),
            Self::AlreadyHeld => write!(f, "symbol already held"),
            Self::MissingPrice => write!(f, "price missing or not positive"),
            Self::NoRiskCapital => write!(f, "risk capital not positive"),
            Self::InvalidStop => write!(f, "stop must be positive and below price"),
            Self::NonPositiveQuantity => write!(f, "quantity not positive after rounding"),
        }
    }
}

/// Sizing outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingDecision {
    /// An order to submit.
    Order(OrderIntent),
    /// No order, with the reason.
    Declined(DeclineReason),
}

impl SizingDecision {
    /// The order, if one was produced.
    #[must_use]
    pub const fn order(&self) -> Option<&OrderIntent> {
        match self {
            Self::Order(order) => Some(order),
            Self::Declined(_) => None,
        }
    }

    /// The decline reason, if declined.
    #[must_use]
    pub const fn decline_reason(&self) -> Option<&DeclineReason> {
        match self {
            Self::Order(_) => None,
            Self::Declined(reason) => Some(reason),
        }
    }
}

/// Everything the engine looks at for one decision.
#[derive(Debug, Clone, Copy)]
pub struct SizingRequest<'a> {
    /// Policy posture.
    pub permission: &'a PolicyResult,
    /// State under evaluation.
    pub state: &'a MarketState,
    /// Capital ledger.
    pub capital: &'a CapitalSnapshot,
    /// Position ledger.
    pub positions: &'a PositionSnapshot,
    /// Current price.
    pub price: Option<Decimal>,
    /// Optional protective stop.
    pub stop: Option<Decimal>,
    /// Regime directive, when one is in force.
    pub directive: Option<&'a ExecutionDirective>,
}

/// Sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingEngine {
    quantity_precision: u32,
    order_type: OrderType,
}

impl SizingEngine {
    /// Create an engine.
    #[must_use]
    pub const fn new(quantity_precision: u32, order_type: OrderType) -> Self {
        Self {
            quantity_precision,
            order_type,
        }
    }

    /// Decide whether to order and how much.
    #[must_use]
    pub fn evaluate(&self, request: &SizingRequest<'_>) -> SizingDecision {
        let decision = self.size(request);
        match &decision {
            SizingDecision::Order(order) => {
                metrics::counter!("orders_sized_total").increment(1);
                tracing::debug!(
                    symbol = %order.symbol,
                    quantity = %order.quantity,
                    rationale = %order.rationale,
                    "Order sized"
                );
            }
            SizingDecision::Declined(reason) => {
                metrics::counter!("orders_declined_total").increment(1);
                tracing::debug!(symbol = %request.state.symbol(), %reason, "Order declined");
            }
        }
        decision
    }

    fn size(&self, request: &SizingRequest<'_>) -> SizingDecision {
        use SizingDecision::Declined;

        if let Some(directive) = request.directive
            && !directive.allow_entries
        {
            return Declined(DeclineReason::EntriesDisallowed);
        }

        let action = request.permission.action;
        if !action.permits_entry() {
            return Declined(DeclineReason::NotPermitted { action });
        }

        let symbol = request.state.symbol();
        if request.positions.holds(symbol) {
            return Declined(DeclineReason::AlreadyHeld);
        }

        let price = match request.price {
            Some(p) if p > Decimal::ZERO => p,
            _ => return Declined(DeclineReason::MissingPrice),
        };

        let multiplier = match request.directive {
            Some(directive) => {
                let m = directive.size_multiplier;
                if m.is_nan() {
                    Decimal::ZERO
                } else {
                    Decimal::from_f64(m.clamp(0.0, 1.0)).unwrap_or(Decimal::ZERO)
                }
            }
            None => Decimal::ONE,
        };
        let capital = request.capital;
        let risk_capital = capital
            .account_equity
            .checked_mul(capital.max_risk_per_trade)
            .and_then(|r| r.checked_mul(multiplier))
            .unwrap_or(Decimal::ZERO);
        if risk_capital <= Decimal::ZERO {
            return Declined(DeclineReason::NoRiskCapital);
        }

        let (raw_quantity, method) = match request.stop {
            Some(stop) => {
                if stop <= Decimal::ZERO || stop >= price {
                    return Declined(DeclineReason::InvalidStop);
                }
                let by_risk = risk_capital.checked_div(price - stop);
                let by_capital = capital.buying_power.checked_div(price);
                match (by_risk, by_capital) {
                    (Some(r), Some(c)) if c < r => (Some(c), "stop_distance_capped"),
                    (by_risk, _) => (by_risk, "stop_distance"),
                }
            }
            None => {
                let budget = risk_capital.min(capital.buying_power);
                (budget.checked_div(price), "capital_fallback")
            }
        };

        let quantity = raw_quantity
            .unwrap_or(Decimal::ZERO)
            .round_dp_with_strategy(self.quantity_precision, RoundingStrategy::ToZero)
            .normalize();
        if quantity <= Decimal::ZERO {
            return Declined(DeclineReason::NonPositiveQuantity);
        }

        SizingDecision::Order(OrderIntent {
            symbol: symbol.clone(),
            side: OrderSide::Buy,
            order_type: self.order_type,
            quantity,
            rationale: format!("{method}: risk_capital={} price={price}", risk_capital.normalize()),
            confidence: request.permission.confidence,
        })
    }
}

impl Default for SizingEngine {
    fn default() -> Self {
        Self::new(6, OrderType::Market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::execution::value_objects::{Position, PositionSide, RiskLevel};
    use crate::domain::shared::{Symbol, Timestamp};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn state() -> MarketState {
        MarketState::builder("TEST", "ai", Timestamp::from_unix_seconds(0).unwrap())
            .with_metrics(0.80, 0.75, 0.10)
            .build()
    }

    fn allow() -> PolicyResult {
        PolicyResult::new(PolicyAction::Allow, 1.0, vec!["coherence_threshold".into()], vec![], "authority")
    }

    fn held(symbol: &str) -> PositionSnapshot {
        PositionSnapshot::from_positions([Position {
            symbol: Symbol::new(symbol),
            quantity: dec!(1),
            average_entry_price: dec!(10),
            market_value: dec!(10),
            unrealized_pnl: dec!(0),
            side: PositionSide::Long,
        }])
    }

    fn size(
        permission: &PolicyResult,
        capital: &CapitalSnapshot,
        positions: &PositionSnapshot,
        price: Option<Decimal>,
        stop: Option<Decimal>,
        directive: Option<&ExecutionDirective>,
    ) -> SizingDecision {
        let state = state();
        SizingEngine::default().evaluate(&SizingRequest {
            permission,
            state: &state,
            capital,
            positions,
            price,
            stop,
            directive,
        })
    }

    #[test]
    fn stop_based_sizing() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.02));
        let decision = size(&allow(), &capital, &PositionSnapshot::empty(), Some(dec!(50)), Some(dec!(45)), None);
        let order = decision.order().unwrap();
        assert_eq!(order.quantity, dec!(400));
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.order_type, OrderType::Market);
        assert!(order.rationale.starts_with("stop_distance"));
    }

    #[test]
    fn tight_stop_capped_by_buying_power() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.02));
        let decision = size(&allow(), &capital, &PositionSnapshot::empty(), Some(dec!(50)), Some(dec!(49.999)), None);
        let order = decision.order().unwrap();
        assert_eq!(order.quantity, dec!(2000));
        assert!(order.quantity * dec!(50) <= capital.buying_power);
        assert!(order.rationale.starts_with("stop_distance_capped"));
    }

    #[test]
    fn capital_fallback_sizing() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.01));
        let decision = size(&allow(), &capital, &PositionSnapshot::empty(), Some(dec!(100)), None, None);
        assert_eq!(decision.order().unwrap().quantity, dec!(10));
    }

    #[test]
    fn fallback_capped_by_buying_power() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.01)).with_buying_power(dec!(500));
        let decision = size(&allow(), &capital, &PositionSnapshot::empty(), Some(dec!(100)), None, None);
        assert_eq!(decision.order().unwrap().quantity, dec!(5));
    }

    #[test]
    fn directive_multiplier_scales_risk_capital() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.02));
        let directive = ExecutionDirective::new(true, 0.25, RiskLevel::Normal);
        let decision = size(
            &allow(),
            &capital,
            &PositionSnapshot::empty(),
            Some(dec!(50)),
            Some(dec!(45)),
            Some(&directive),
        );
        assert_eq!(decision.order().unwrap().quantity, dec!(100));
    }

    #[test]
    fn rejection_order_directive_first() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.02));
        let directive = ExecutionDirective::new(false, 1.0, RiskLevel::SystemicLockdown);
        let hold = PolicyResult::new(PolicyAction::Hold, 1.0, vec![], vec![], "authority");
        let decision = size(&hold, &capital, &held("TEST"), None, None, Some(&directive));
        assert_eq!(decision.decline_reason(), Some(&DeclineReason::EntriesDisallowed));
    }

    #[test]
    fn non_allow_permission_declines() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.02));
        let watch = PolicyResult::new(PolicyAction::Watch, 0.7, vec![], vec![], "conservative");
        let decision = size(&watch, &capital, &PositionSnapshot::empty(), Some(dec!(50)), None, None);
        assert_eq!(
            decision.decline_reason(),
            Some(&DeclineReason::NotPermitted {
                action: PolicyAction::Watch
            })
        );
    }

    #[test]
    fn held_symbol_declines() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.02));
        let decision = size(&allow(), &capital, &held("test"), Some(dec!(50)), None, None);
        assert_eq!(decision.decline_reason(), Some(&DeclineReason::AlreadyHeld));
    }

    #[test]
    fn missing_or_bad_price_declines() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.02));
        for price in [None, Some(dec!(0)), Some(dec!(-1))] {
            let decision = size(&allow(), &capital, &PositionSnapshot::empty(), price, None, None);
            assert_eq!(decision.decline_reason(), Some(&DeclineReason::MissingPrice));
        }
    }

    #[test]
    fn zero_multiplier_declines_for_lack_of_risk_capital() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.02));
        let directive = ExecutionDirective::new(true, 0.0, RiskLevel::Elevated);
        let decision = size(&allow(), &capital, &PositionSnapshot::empty(), Some(dec!(50)), None, Some(&directive));
        assert_eq!(decision.decline_reason(), Some(&DeclineReason::NoRiskCapital));
    }

    #[test]
    fn stop_at_or_above_price_declines() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.02));
        for stop in [dec!(50), dec!(55), dec!(0)] {
            let decision = size(&allow(), &capital, &PositionSnapshot::empty(), Some(dec!(50)), Some(stop), None);
            assert_eq!(decision.decline_reason(), Some(&DeclineReason::InvalidStop));
        }
    }

    #[test]
    fn dust_quantity_declines() {
        let capital = CapitalSnapshot::cash_account(dec!(1), dec!(0.000001));
        let decision = size(&allow(), &capital, &PositionSnapshot::empty(), Some(dec!(1000000)), None, None);
        assert_eq!(decision.decline_reason(), Some(&DeclineReason::NonPositiveQuantity));
    }

    #[test]
    fn quantity_truncates_toward_zero() {
        let capital = CapitalSnapshot::cash_account(dec!(1000), dec!(0.01));
        let decision = size(&allow(), &capital, &PositionSnapshot::empty(), Some(dec!(3)), None, None);
        assert_eq!(decision.order().unwrap().quantity, dec!(3.333333));
    }

    #[test]
    fn confidence_carried_from_policy() {
        let capital = CapitalSnapshot::cash_account(dec!(100000), dec!(0.01));
        let permission = PolicyResult::new(PolicyAction::Allow, 0.85, vec![], vec![], "conservative");
        let decision = size(&permission, &capital, &PositionSnapshot::empty(), Some(dec!(100)), None, None);
        assert_eq!(decision.order().unwrap().confidence, 0.85);
    }

    proptest! {
        #[test]
        fn never_emits_non_positive_quantity(
            equity in 0i64..10_000_000,
            risk_bps in 0i64..1_000,
            price_cents in -1_000i64..1_000_000,
            stop_cents in proptest::option::of(-1_000i64..1_000_000),
            multiplier in -0.5f64..1.5,
        ) {
            let capital = CapitalSnapshot::cash_account(Decimal::from(equity), Decimal::new(risk_bps, 4));
            let directive = ExecutionDirective::new(true, multiplier, RiskLevel::Normal);
            let decision = size(
                &allow(),
                &capital,
                &PositionSnapshot::empty(),
                Some(Decimal::new(price_cents, 2)),
                stop_cents.map(|s| Decimal::new(s, 2)),
                Some(&directive),
            );
            if let Some(order) = decision.order() {
                prop_assert!(order.quantity > Decimal::ZERO);
            }
        }

        #[test]
        fn notional_within_buying_power(
            equity in 1i64..10_000_000,
            risk_bps in 1i64..1_000,
            price_cents in 1i64..1_000_000,
            stop_fraction in 0.0001f64..0.9999,
        ) {
            let capital = CapitalSnapshot::cash_account(Decimal::from(equity), Decimal::new(risk_bps, 4));
            let price = Decimal::new(price_cents, 2);
            let stop = (price * Decimal::from_f64(stop_fraction).unwrap()).round_dp(4);
            let decision = size(&allow(), &capital, &PositionSnapshot::empty(), Some(price), Some(stop), None);
            if let Some(order) = decision.order() {
                prop_assert!(order.quantity * price <= capital.buying_power);
            }
        }

        #[test]
        fn deterministic(equity in 1i64..10_000_000, price_cents in 1i64..1_000_000) {
            let capital = CapitalSnapshot::cash_account(Decimal::from(equity), dec!(0.02));
            let a = size(&allow(), &capital, &PositionSnapshot::empty(), Some(Decimal::new(price_cents, 2)), None, None);
            let b = size(&allow(), &capital, &PositionSnapshot::empty(), Some(Decimal::new(price_cents, 2)), None, None);
            prop_assert_eq!(a, b);
        }
    }
}
