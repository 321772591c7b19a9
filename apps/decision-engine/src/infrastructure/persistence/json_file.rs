//! File-backed latest-decision store.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::application::ports::{DecisionStore, DecisionStoreError};
use crate::domain::decision::DecisionResult;

/// Stores the latest decision as pretty JSON.
///
/// Writes go to a sibling temp file which is synced and renamed over the
/// target, so a reader sees either the old or the new decision.
#[derive(Debug)]
pub struct JsonFileDecisionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileDecisionStore {
    /// Create a store at `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionStoreError::Io`] if the directory cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DecisionStoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Store location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DecisionStore for JsonFileDecisionStore {
    fn save(&self, decision: &DecisionResult) -> Result<(), DecisionStoreError> {
        let json = serde_json::to_vec_pretty(decision)?;
        let _guard = self.write_lock.lock();
        let temp = self.temp_path();
        {
            let mut file = File::create(&temp)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        std::fs::rename(&temp, &self.path)?;
        tracing::debug!(path = %self.path.display(), symbol = %decision.symbol(), "Decision persisted");
        Ok(())
    }

    fn load_latest(&self) -> Result<Option<DecisionResult>, DecisionStoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{DecisionKernel, MarketState};
    use crate::domain::shared::Timestamp;

    fn decision(symbol: &str, coherence: f64) -> DecisionResult {
        let state = MarketState::builder(symbol, "ai", Timestamp::from_unix_seconds(60).unwrap())
            .with_metrics(0.7, coherence, 0.2)
            .build();
        DecisionKernel::default().evaluate(&state)
    }

    #[test]
    fn empty_store_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileDecisionStore::new(dir.path().join("latest.json")).unwrap();
        assert!(store.load_latest().unwrap().is_none());
    }

    #[test]
    fn last_write_wins_with_full_trace() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileDecisionStore::new(dir.path().join("state").join("latest.json")).unwrap();
        store.save(&decision("AAA", 0.9)).unwrap();
        let second = decision("BBB", 0.4);
        store.save(&second).unwrap();

        let loaded = store.load_latest().unwrap().unwrap();
        assert_eq!(loaded.symbol(), second.symbol());
        assert_eq!(loaded.decision(), second.decision());
        assert_eq!(loaded.rule_results().len(), second.rule_results().len());
        assert!(!dir.path().join("state").join("latest.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest.json");
        std::fs::write(&path, "{").unwrap();
        let store = JsonFileDecisionStore::new(&path).unwrap();
        assert!(matches!(store.load_latest(), Err(DecisionStoreError::Serialization(_))));
    }
}
