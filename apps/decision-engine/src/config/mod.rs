//! Configuration module for the decision engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for every component.
//!
//! # Usage
//!
//! ```rust,ignore
//! use decision_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! let monitor = config.regime.to_monitor();
//! ```

mod audit;
mod engine;
mod market_gate;
mod observability;
mod persistence;
mod policy;
mod recovery;
mod regime;
mod rules;
mod sizing;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use audit::AuditConfig;
pub use engine::EngineConfig;
pub use market_gate::MarketGateConfig;
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use persistence::PersistenceConfig;
pub use policy::{PolicyConfig, PolicyKind};
pub use recovery::RecoveryConfig;
pub use regime::{HardInterruptConfig, RegimeConfig};
pub use rules::{
    ChaosConfig, CoherenceRuleConfig, IntentionEligibilityConfig, LatencyConfig,
    NarrativeAccelerationConfig, RulesConfig, StructuralAlignmentConfig,
};
pub use sizing::SizingConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rule registry.
    #[serde(default)]
    pub rules: RulesConfig,
    /// Market capacity gate.
    #[serde(default)]
    pub market_gate: MarketGateConfig,
    /// Permission policy.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Regime thresholds.
    #[serde(default)]
    pub regime: RegimeConfig,
    /// Recovery ramp.
    #[serde(default)]
    pub recovery: RecoveryConfig,
    /// Sizing engine.
    #[serde(default)]
    pub sizing: SizingConfig,
    /// Regime audit log.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Latest-decision persistence.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Replay runner.
    #[serde(default)]
    pub engine: EngineConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config.rules.validate()?;
    config.regime.validate()?;
    config.recovery.to_controller()?;

    let gate = &config.market_gate;
    require_unit("market_gate.min_liquidity", gate.min_liquidity)?;
    require_unit("market_gate.max_volatility", gate.max_volatility)?;
    require_unit("market_gate.min_responsiveness", gate.min_responsiveness)?;
    require_unit("policy.min_liquidity", config.policy.min_liquidity)?;

    if config.sizing.quantity_precision > SizingConfig::MAX_PRECISION {
        return Err(ConfigError::ValidationError(format!(
            "sizing.quantity_precision must be at most {}",
            SizingConfig::MAX_PRECISION
        )));
    }

    let format = config.observability.logging.format.as_str();
    if !LoggingConfig::FORMATS.contains(&format) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {:?}",
            LoggingConfig::FORMATS
        )));
    }

    if config.audit.enabled && config.audit.path.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "audit.path must be set when audit is enabled".to_string(),
        ));
    }

    if config.persistence.enabled && config.persistence.decision_path.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "persistence.decision_path must be set when persistence is enabled".to_string(),
        ));
    }

    Ok(())
}

fn require_unit(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{name} must be between 0.0 and 1.0"
        )))
    }
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!((config.regime.stressed - 0.55).abs() < f64::EPSILON);
        assert!((config.market_gate.min_liquidity - 0.30).abs() < f64::EPSILON);
        assert_eq!(config.policy.kind, PolicyKind::Authority);
        assert_eq!(config.sizing.quantity_precision, 6);
        assert_eq!(config.recovery.steps, 5);
        assert!(config.audit.enabled);
        assert_eq!(config.observability.logging.format, "json");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config.rules.enabled.len(), 6);
    }

    #[test]
    fn test_load_partial_config() {
        let yaml = r"
regime:
  stressed: 0.50
policy:
  kind: conservative
sizing:
  quantity_precision: 2
  order_type: LIMIT
";
        let config = load_config_from_string(yaml).unwrap();
        assert!((config.regime.stressed - 0.50).abs() < f64::EPSILON);
        assert!((config.regime.systemic - 0.85).abs() < f64::EPSILON);
        assert_eq!(config.policy.kind, PolicyKind::Conservative);
        assert_eq!(config.sizing.quantity_precision, 2);
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "path: ${DECISION_ENGINE_TEST_NONEXISTENT_VAR:-./audit.jsonl}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "path: ./audit.jsonl");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);
        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "path: ${DECISION_ENGINE_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "path: ");
    }

    #[test]
    fn test_validation_unordered_regime() {
        let yaml = r"
regime:
  stressed: 0.9
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for unordered thresholds");
        };
        assert!(err.to_string().contains("regime"));
    }

    #[test]
    fn test_validation_gate_out_of_range() {
        let yaml = r"
market_gate:
  max_volatility: 1.5
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for max_volatility");
        };
        assert!(err.to_string().contains("max_volatility"));
    }

    #[test]
    fn test_validation_precision_too_high() {
        let yaml = r"
sizing:
  quantity_precision: 20
";
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for log format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_validation_zero_recovery_steps() {
        let yaml = r"
recovery:
  steps: 0
";
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_config(Some("/nonexistent/decision-engine.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
