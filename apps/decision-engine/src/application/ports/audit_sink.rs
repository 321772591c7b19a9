//! Audit Sink Port (Driven Port)
//!
//! Append-only destination for regime transition events.

use crate::domain::regime::RegimeTransitionEvent;

/// Audit write error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// I/O failure.
    #[error("Audit I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Event could not be encoded.
    #[error("Audit serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Sink rejected the write.
    #[error("Audit sink unavailable: {message}")]
    Unavailable {
        /// Details.
        message: String,
    },
}

/// Port for recording regime transitions.
#[cfg_attr(test, mockall::automock)]
pub trait AuditSink: Send + Sync {
    /// Append one event. Must be durable when this returns `Ok`.
    fn record(&self, event: &RegimeTransitionEvent) -> Result<(), AuditError>;
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAuditSink;

impl AuditSink for NoOpAuditSink {
    fn record(&self, _event: &RegimeTransitionEvent) -> Result<(), AuditError> {
        Ok(())
    }
}
