//! Domain errors shared across bounded contexts.

use std::fmt;

/// Domain-level errors that can occur in business logic.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid state transition attempted.
    InvalidStateTransition {
        /// Entity type (e.g., "FrozenClock").
        entity: String,
        /// Current state.
        from: String,
        /// Attempted state.
        to: String,
        /// Reason for failure.
        reason: String,
    },

    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

impl DomainError {
    /// Shorthand for an [`DomainError::InvalidValue`].
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStateTransition {
                entity,
                from,
                to,
                reason,
            } => {
                write!(
                    f,
                    "Invalid state transition for {entity}: {from} -> {to} ({reason})"
                )
            }
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for {field}: {message}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_invalid_state_transition_display() {
        let err = DomainError::InvalidStateTransition {
            entity: "FrozenClock".to_string(),
            from: "2026-01-01T00:00:10+00:00".to_string(),
            to: "2026-01-01T00:00:05+00:00".to_string(),
            reason: "time cannot move backward".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("FrozenClock"));
        assert!(msg.contains("cannot move backward"));
    }

    #[test]
    fn domain_error_invalid_value_display() {
        let err = DomainError::invalid_value("systemic", "must be in (0, 1]");
        assert_eq!(err.to_string(), "Invalid value for systemic: must be in (0, 1]");
    }
}
