//! Logging setup
//!
//! Installs a `tracing` subscriber with an env filter and either
//! human-readable or JSON output.

use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Telemetry errors
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The global subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Build the env filter, preferring `RUST_LOG` over the configured directive
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Initialize the global `tracing` subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(format = ?config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_fails() {
        let config = LoggingConfig::default();
        // The first call may lose the race against another test's subscriber
        let _ = init_logging(&config);
        assert!(matches!(init_logging(&config), Err(TelemetryError::Init(_))));
    }

    #[test]
    fn env_filter_builds_from_config() {
        let config = LoggingConfig {
            filter: "debug".to_string(),
            format: LogFormat::Json,
        };
        let filter = env_filter(&config);
        assert!(!filter.to_string().is_empty());
    }
}
