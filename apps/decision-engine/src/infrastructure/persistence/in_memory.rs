//! In-memory latest-decision store.

use parking_lot::RwLock;

use crate::application::ports::{DecisionStore, DecisionStoreError};
use crate::domain::decision::DecisionResult;

/// Holds the latest decision in memory.
#[derive(Debug, Default)]
pub struct InMemoryDecisionStore {
    latest: RwLock<Option<DecisionResult>>,
}

impl InMemoryDecisionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DecisionStore for InMemoryDecisionStore {
    fn save(&self, decision: &DecisionResult) -> Result<(), DecisionStoreError> {
        *self.latest.write() = Some(decision.clone());
        Ok(())
    }

    fn load_latest(&self) -> Result<Option<DecisionResult>, DecisionStoreError> {
        Ok(self.latest.read().clone())
    }
}
