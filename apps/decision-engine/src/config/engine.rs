//! Replay runner configuration.

use serde::{Deserialize, Serialize};

/// Settings for the `decision-engine` binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// JSON array of macro frames; `--frames` overrides it.
    #[serde(default)]
    pub replay_path: Option<String>,
    /// Stop after this many cycles. Defaults to one per frame.
    #[serde(default)]
    pub max_cycles: Option<usize>,
}
