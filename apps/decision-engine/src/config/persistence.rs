//! Latest-decision persistence configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Where the latest decision is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Persist to disk. When off, an in-memory store is used.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// File path for the latest decision.
    #[serde(default = "default_decision_path")]
    pub decision_path: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            decision_path: default_decision_path(),
        }
    }
}

fn default_decision_path() -> String {
    "./data/latest_decision.json".to_string()
}
