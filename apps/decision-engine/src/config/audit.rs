//! Regime audit log configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Where regime transitions are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Write the JSONL log. When off, transitions are only logged.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log path.
    #[serde(default = "default_audit_path")]
    pub path: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_audit_path(),
        }
    }
}

fn default_audit_path() -> String {
    "./data/regime_audit.jsonl".to_string()
}
