//! Tracing subscriber initialisation.
//!
//! `RUST_LOG` is honoured; the configured level is added as a directive for
//! this crate. Metrics go through the `metrics` facade and are dropped
//! unless the embedding process installs a recorder.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use crate::config::LoggingConfig;

/// Telemetry setup failure.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Level did not parse as a filter directive.
    #[error("Invalid log directive '{directive}': {message}")]
    InvalidDirective {
        /// Directive text.
        directive: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber is already installed.
    #[error("Tracing already initialised: {0}")]
    AlreadyInitialised(String),
}

/// Build the filter for `config`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidDirective`] for an unparseable level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    let directive = format!("decision_engine={}", config.level);
    let parsed = directive
        .parse::<Directive>()
        .map_err(|e| TelemetryError::InvalidDirective {
            directive: directive.clone(),
            message: e.to_string(),
        })?;
    Ok(EnvFilter::from_default_env().add_directive(parsed))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError`] if the level is invalid or a subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match config.format.as_str() {
        "pretty" => builder.pretty().try_init(),
        "compact" => builder.compact().try_init(),
        _ => builder
            .json()
            .with_current_span(config.include_spans)
            .with_span_list(config.include_spans)
            .try_init(),
    };
    result.map_err(|e| TelemetryError::AlreadyInitialised(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_level_builds_filter() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            ..LoggingConfig::default()
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn garbage_level_is_rejected() {
        let config = LoggingConfig {
            level: "not a level!".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            env_filter(&config),
            Err(TelemetryError::InvalidDirective { .. })
        ));
    }
}
