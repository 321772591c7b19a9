//! Decision Store Port (Driven Port)
//!
//! Keeps exactly the latest [`DecisionResult`], last write wins.

use crate::domain::decision::DecisionResult;

/// Decision store error.
#[derive(Debug, thiserror::Error)]
pub enum DecisionStoreError {
    /// I/O failure.
    #[error("Decision store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored record could not be (de)serialized.
    #[error("Decision store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Port for persisting the latest decision.
#[cfg_attr(test, mockall::automock)]
pub trait DecisionStore: Send + Sync {
    /// Replace the stored decision.
    fn save(&self, decision: &DecisionResult) -> Result<(), DecisionStoreError>;

    /// The most recently saved decision, if any.
    fn load_latest(&self) -> Result<Option<DecisionResult>, DecisionStoreError>;
}
