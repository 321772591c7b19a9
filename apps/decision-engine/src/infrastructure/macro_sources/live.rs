//! Live macro feed adapter.

use std::fmt;

use super::injected::validate;
use crate::application::ports::{MacroSource, MacroSourceError};
use crate::domain::regime::{MacroSourceType, SystemicInputs};

/// Pulls a frame from a caller-supplied feed each cycle.
///
/// Out-of-range readings are passed through; the monitor treats them as
/// maximum stress. Only a feed error aborts the cycle.
pub struct LiveMacroSource<F> {
    feed: F,
    strict: bool,
}

impl<F> LiveMacroSource<F>
where
    F: FnMut() -> Result<SystemicInputs, MacroSourceError> + Send,
{
    /// Wrap `feed`.
    pub fn new(feed: F) -> Self {
        Self { feed, strict: false }
    }

    /// Reject frames with readings outside [0, 1] instead of passing them on.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

impl<F> fmt::Debug for LiveMacroSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveMacroSource")
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

impl<F> MacroSource for LiveMacroSource<F>
where
    F: FnMut() -> Result<SystemicInputs, MacroSourceError> + Send,
{
    fn collect(&mut self) -> Result<SystemicInputs, MacroSourceError> {
        let frame = (self.feed)()?;
        if self.strict {
            validate(&frame)?;
        }
        Ok(frame)
    }

    fn source_type(&self) -> MacroSourceType {
        MacroSourceType::Live
    }
}
