//! Macro Source Port (Driven Port)
//!
//! Supplies one [`SystemicInputs`] frame per orchestration cycle.

use crate::domain::regime::{MacroSourceType, SystemicInputs};

/// Macro source error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacroSourceError {
    /// Source has nothing to give.
    #[error("Macro source exhausted: {message}")]
    Exhausted {
        /// Details.
        message: String,
    },

    /// Upstream feed failed.
    #[error("Macro feed unavailable: {message}")]
    Unavailable {
        /// Details.
        message: String,
    },

    /// Frame failed validation.
    #[error("Invalid macro frame: {message}")]
    InvalidFrame {
        /// Details.
        message: String,
    },
}

/// Port for collecting macro stress inputs.
///
/// `collect` takes `&mut self` so replay sources can advance a cursor.
#[cfg_attr(test, mockall::automock)]
pub trait MacroSource: Send {
    /// Collect the next frame.
    fn collect(&mut self) -> Result<SystemicInputs, MacroSourceError>;

    /// Provenance label stamped on audit events.
    fn source_type(&self) -> MacroSourceType;
}
