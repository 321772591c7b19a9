//! Rule categories and per-rule evaluation results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authority class of a rule.
///
/// The category fixes what a rule's result is allowed to do:
/// intents request, constraints veto, protections override, hybrids
/// may request or veto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCategory {
    /// Requests a trade.
    Intent,
    /// May request or veto.
    Hybrid,
    /// Vetoes a trade.
    Constraint,
    /// Overrides every other outcome.
    Protection,
}

impl RuleCategory {
    /// Evaluation order.
    pub const ORDER: [Self; 4] = [Self::Intent, Self::Hybrid, Self::Constraint, Self::Protection];

    /// Position of this category in [`Self::ORDER`].
    #[must_use]
    pub const fn rank(self) -> usize {
        match self {
            Self::Intent => 0,
            Self::Hybrid => 1,
            Self::Constraint => 2,
            Self::Protection => 3,
        }
    }

    /// Whether a result of this category may request a trade.
    #[must_use]
    pub const fn can_request(self) -> bool {
        matches!(self, Self::Intent | Self::Hybrid)
    }

    /// Whether a result of this category may veto a trade.
    #[must_use]
    pub const fn can_block(self) -> bool {
        matches!(self, Self::Hybrid | Self::Constraint | Self::Protection)
    }

    /// Whether a result of this category may carry an override token.
    #[must_use]
    pub const fn can_override(self) -> bool {
        matches!(self, Self::Protection)
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intent => "INTENT",
            Self::Hybrid => "HYBRID",
            Self::Constraint => "CONSTRAINT",
            Self::Protection => "PROTECTION",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one rule against one market state.
///
/// Constructors clamp authority to the category: a block requested by an
/// INTENT rule, or an override requested by anything but PROTECTION, is
/// dropped at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    rule_name: String,
    category: RuleCategory,
    triggered: bool,
    score_delta: Option<f64>,
    block: bool,
    #[serde(rename = "override")]
    override_token: Option<String>,
    reason: String,
}

impl RuleResult {
    fn new(
        rule_name: impl Into<String>,
        category: RuleCategory,
        triggered: bool,
        block: bool,
        override_token: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            category,
            triggered,
            score_delta: None,
            block: block && category.can_block(),
            override_token: override_token.filter(|_| category.can_override()),
            reason: reason.into(),
        }
    }

    /// Neither triggered nor blocking; the reason explains why.
    #[must_use]
    pub fn abstain(
        rule_name: impl Into<String>,
        category: RuleCategory,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(rule_name, category, false, false, None, reason)
    }

    /// Condition met, no veto.
    #[must_use]
    pub fn trigger(
        rule_name: impl Into<String>,
        category: RuleCategory,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(rule_name, category, true, false, None, reason)
    }

    /// Evaluated with an explicit trigger flag, no veto.
    #[must_use]
    pub fn evaluated(
        rule_name: impl Into<String>,
        category: RuleCategory,
        triggered: bool,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(rule_name, category, triggered, false, None, reason)
    }

    /// Veto. Ignored for categories that cannot block.
    #[must_use]
    pub fn block(
        rule_name: impl Into<String>,
        category: RuleCategory,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(rule_name, category, false, true, None, reason)
    }

    /// Protection override carrying `token`.
    #[must_use]
    pub fn override_with(
        rule_name: impl Into<String>,
        token: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(
            rule_name,
            RuleCategory::Protection,
            true,
            true,
            Some(token.into()),
            reason,
        )
    }

    /// Attach a score contribution.
    #[must_use]
    pub fn with_score(mut self, delta: f64) -> Self {
        self.score_delta = Some(delta);
        self
    }

    /// Rule identifier.
    #[must_use]
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Authority class.
    #[must_use]
    pub const fn category(&self) -> RuleCategory {
        self.category
    }

    /// Whether the rule's condition was met.
    #[must_use]
    pub const fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Whether this result requests a trade (triggered and allowed to request).
    #[must_use]
    pub const fn requests_trade(&self) -> bool {
        self.triggered && self.category.can_request()
    }

    /// Score contribution, if any.
    #[must_use]
    pub const fn score_delta(&self) -> Option<f64> {
        self.score_delta
    }

    /// Whether this result vetoes a trade.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        self.block
    }

    /// Override token, if any.
    #[must_use]
    pub fn override_token(&self) -> Option<&str> {
        self.override_token.as_deref()
    }

    /// Human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
