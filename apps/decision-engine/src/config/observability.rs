//! Observability configuration for logging.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObservabilityConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for this crate's targets.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: `json`, `pretty` or `compact`.
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Include span information (json only).
    #[serde(default = "default_true")]
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            include_spans: true,
        }
    }
}

impl LoggingConfig {
    /// Accepted formats.
    pub const FORMATS: [&'static str; 3] = ["json", "pretty", "compact"];
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}
