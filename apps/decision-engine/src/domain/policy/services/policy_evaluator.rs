//! Policy Evaluator.
//!
//! Maps a rule trace plus the market-capacity gate onto one decision token.
//!
//! # Precedence
//!
//! 1. market not confirmed → `BLOCKED`
//! 2. any protection override → `OVERRIDDEN`
//! 3. any block (constraint, hybrid, protection) → `BLOCKED`
//! 4. any triggered intent or hybrid → `ALLOW_BUY`
//! 5. intent rules present, none triggered → `DEFERRED`
//! 6. no intent rules → `NO_ACTION`

use serde::{Deserialize, Serialize};

use crate::domain::decision::{DecisionType, MarketGateResult, RuleResult};

/// Decision token plus the facts that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    /// Resolved token.
    pub decision: DecisionType,
    /// Names of rules that requested a trade.
    pub triggered_rules: Vec<String>,
    /// Gate failures, overrides and blocks, in precedence order.
    pub gating_reasons: Vec<String>,
}

/// Stateless evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyEvaluator;

impl PolicyEvaluator {
    /// Create an evaluator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolve the decision token. Independent of the order of `results`.
    #[must_use]
    pub fn evaluate(&self, results: &[RuleResult], market_confirmed: bool) -> DecisionType {
        if !market_confirmed {
            return DecisionType::Blocked;
        }
        if results.iter().any(|r| r.override_token().is_some()) {
            return DecisionType::Overridden;
        }
        if results.iter().any(RuleResult::is_blocking) {
            return DecisionType::Blocked;
        }

        let mut intents = results.iter().filter(|r| r.category().can_request()).peekable();
        if intents.peek().is_none() {
            return DecisionType::NoAction;
        }
        if intents.any(|r| r.is_triggered()) {
            DecisionType::AllowBuy
        } else {
            DecisionType::Deferred
        }
    }

    /// Resolve the token and collect the reasons behind it.
    #[must_use]
    pub fn assess(&self, results: &[RuleResult], gate: &MarketGateResult) -> PolicyVerdict {
        let decision = self.evaluate(results, gate.confirmed);

        let mut gating_reasons: Vec<String> = gate.reasons.clone();
        gating_reasons.extend(results.iter().filter_map(|r| {
            r.override_token()
                .map(|token| format!("{}: override {token} ({})", r.rule_name(), r.reason()))
        }));
        gating_reasons.extend(
            results
                .iter()
                .filter(|r| r.is_blocking() && r.override_token().is_none())
                .map(|r| format!("{}: {}", r.rule_name(), r.reason())),
        );

        let triggered_rules = results
            .iter()
            .filter(|r| r.requests_trade())
            .map(|r| r.rule_name().to_string())
            .collect();

        tracing::debug!(decision = %decision, reasons = ?gating_reasons, "Policy verdict");

        PolicyVerdict {
            decision,
            triggered_rules,
            gating_reasons,
        }
    }
}
