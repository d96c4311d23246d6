//! Tracing subscriber initialization.

use tracing::debug;
use tracing_subscriber::EnvFilter;
use twinverse_error::ConfigError;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set. With `json` enabled,
/// events are written as one JSON object per line.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the filter does not parse or a global
/// subscriber is already installed.
pub fn init_tracing(default_filter: &str, json: bool) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| ConfigError::new(format!("Invalid log filter '{}': {}", default_filter, e)))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| ConfigError::new(format!("Failed to install tracing subscriber: {}", e)))?;
    debug!(json, "Tracing initialized");
    Ok(())
}
