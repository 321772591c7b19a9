//! Aggregate decision over an ordered rule trace.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::rule_result::RuleResult;
use crate::domain::shared::{Symbol, Timestamp};

/// Aggregate decision token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionType {
    /// Nothing requested a trade.
    NoAction,
    /// An unvetoed request to open a long position.
    AllowBuy,
    /// Vetoed by a constraint (or by the market-capacity gate).
    Blocked,
    /// A protection override fired.
    Overridden,
    /// Intent rules were present but none triggered.
    Deferred,
}

impl DecisionType {
    /// Aggregate a rule trace.
    ///
    /// Override beats block, block beats request. Pure function of `results`;
    /// order within the slice does not matter.
    #[must_use]
    pub fn aggregate(results: &[RuleResult]) -> Self {
        if results.iter().any(|r| r.override_token().is_some()) {
            Self::Overridden
        } else if results.iter().any(RuleResult::is_blocking) {
            Self::Blocked
        } else if results.iter().any(RuleResult::requests_trade) {
            Self::AllowBuy
        } else {
            Self::NoAction
        }
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoAction => "NO_ACTION",
            Self::AllowBuy => "ALLOW_BUY",
            Self::Blocked => "BLOCKED",
            Self::Overridden => "OVERRIDDEN",
            Self::Deferred => "DEFERRED",
        }
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered rule trace plus its aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    symbol: Symbol,
    observed_at: Timestamp,
    rule_results: Vec<RuleResult>,
    decision: DecisionType,
}

impl DecisionResult {
    /// Build from a rule trace; the aggregate is derived, never supplied.
    #[must_use]
    pub fn from_results(symbol: Symbol, observed_at: Timestamp, rule_results: Vec<RuleResult>) -> Self {
        let decision = DecisionType::aggregate(&rule_results);
        Self {
            symbol,
            observed_at,
            rule_results,
            decision,
        }
    }

    /// Instrument the decision is about.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Observation instant of the evaluated state.
    #[must_use]
    pub const fn observed_at(&self) -> Timestamp {
        self.observed_at
    }

    /// Full rule trace in evaluation order.
    #[must_use]
    pub fn rule_results(&self) -> &[RuleResult] {
        &self.rule_results
    }

    /// Aggregate token.
    #[must_use]
    pub const fn decision(&self) -> DecisionType {
        self.decision
    }

    /// Names of rules that requested a trade.
    #[must_use]
    pub fn triggered_rules(&self) -> Vec<&str> {
        self.rule_results
            .iter()
            .filter(|r| r.requests_trade())
            .map(RuleResult::rule_name)
            .collect()
    }

    /// Reasons of blocking results.
    #[must_use]
    pub fn block_reasons(&self) -> Vec<&str> {
        self.rule_results
            .iter()
            .filter(|r| r.is_blocking())
            .map(RuleResult::reason)
            .collect()
    }

    /// Sum of score contributions from rules that requested a trade.
    #[must_use]
    pub fn intent_score(&self) -> f64 {
        self.rule_results
            .iter()
            .filter(|r| r.requests_trade())
            .filter_map(RuleResult::score_delta)
            .sum()
    }
}
