//! In-memory audit sink for tests and dry runs.

use parking_lot::RwLock;

use crate::application::ports::{AuditError, AuditSink};
use crate::domain::regime::RegimeTransitionEvent;

/// Keeps events in memory. Not durable.
#[derive(Debug, Default)]
pub struct InMemoryAuditSink {
    events: RwLock<Vec<RegimeTransitionEvent>>,
}

impl InMemoryAuditSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every recorded event, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<RegimeTransitionEvent> {
        self.events.read().clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, event: &RegimeTransitionEvent) -> Result<(), AuditError> {
        self.events.write().push(event.clone());
        Ok(())
    }
}
