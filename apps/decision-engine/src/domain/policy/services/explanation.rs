//! Human-readable policy explanations.

use crate::domain::policy::value_objects::PolicyResult;

/// Render a one-line explanation of a policy result.
///
/// ```text
/// Policy decision: ALLOW (100% confidence). Triggered rules: a, b. Reason: x; y.
/// ```
#[must_use]
pub fn format_policy_explanation(result: &PolicyResult) -> String {
    let triggered = if result.triggered_rules.is_empty() {
        "none".to_string()
    } else {
        result.triggered_rules.join(", ")
    };

    let mut line = format!(
        "Policy decision: {} ({:.0}% confidence). Triggered rules: {triggered}.",
        result.action,
        result.confidence * 100.0
    );
    if !result.gating_reasons.is_empty() {
        line.push_str(" Reason: ");
        line.push_str(&result.gating_reasons.join("; "));
        line.push('.');
    }
    line
}
