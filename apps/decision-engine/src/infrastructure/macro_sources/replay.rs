//! Deterministic replay of recorded macro frames.

use std::path::Path;

use crate::application::ports::{MacroSource, MacroSourceError};
use crate::domain::regime::{MacroSourceType, SystemicInputs};

/// Advances one frame per `collect`; repeats the last frame once exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayMacroSource {
    frames: Vec<SystemicInputs>,
    cursor: usize,
}

impl ReplayMacroSource {
    /// Create a source over `frames`.
    ///
    /// # Errors
    ///
    /// Returns [`MacroSourceError::Exhausted`] if `frames` is empty.
    pub fn new(frames: Vec<SystemicInputs>) -> Result<Self, MacroSourceError> {
        if frames.is_empty() {
            return Err(MacroSourceError::Exhausted {
                message: "replay requires at least one frame".to_string(),
            });
        }
        Ok(Self { frames, cursor: 0 })
    }

    /// Load a JSON array of frames.
    ///
    /// # Errors
    ///
    /// Returns [`MacroSourceError::Unavailable`] if the file cannot be read,
    /// [`MacroSourceError::InvalidFrame`] if it does not parse, and
    /// [`MacroSourceError::Exhausted`] if the array is empty.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MacroSourceError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| MacroSourceError::Unavailable {
                message: format!("{}: {e}", path.display()),
            })?;
        let frames: Vec<SystemicInputs> =
            serde_json::from_str(&contents).map_err(|e| MacroSourceError::InvalidFrame {
                message: format!("{}: {e}", path.display()),
            })?;
        tracing::debug!(path = %path.display(), frames = frames.len(), "Loaded replay frames");
        Self::new(frames)
    }

    /// Total frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; construction rejects an empty replay.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.cursor)
    }
}

impl MacroSource for ReplayMacroSource {
    fn collect(&mut self) -> Result<SystemicInputs, MacroSourceError> {
        let index = self.cursor.min(self.frames.len() - 1);
        if self.cursor < self.frames.len() {
            self.cursor += 1;
        }
        Ok(self.frames[index])
    }

    fn source_type(&self) -> MacroSourceType {
        MacroSourceType::Replay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_replay_is_rejected() {
        assert!(matches!(
            ReplayMacroSource::new(vec![]),
            Err(MacroSourceError::Exhausted { .. })
        ));
    }

    #[test]
    fn advances_then_repeats_last() {
        let mut source = ReplayMacroSource::new(vec![
            SystemicInputs::uniform(0.1),
            SystemicInputs::uniform(0.2),
        ])
        .unwrap();
        assert_eq!(source.collect().unwrap(), SystemicInputs::uniform(0.1));
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.collect().unwrap(), SystemicInputs::uniform(0.2));
        assert_eq!(source.collect().unwrap(), SystemicInputs::uniform(0.2));
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.source_type(), MacroSourceType::Replay);
    }

    #[test]
    fn from_file_reads_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"drawdown_velocity":0.9,"liquidity_stress":0.9,"correlation_spike":0.9,
                "narrative_shock":0.9,"structural_confirmation":0.9}}]"#
        )
        .unwrap();
        let source = ReplayMacroSource::from_file(file.path()).unwrap();
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn from_file_missing_is_unavailable() {
        let err = ReplayMacroSource::from_file("/nonexistent/frames.json").unwrap_err();
        assert!(matches!(err, MacroSourceError::Unavailable { .. }));
    }
}
