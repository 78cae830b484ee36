//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use auth_shared::{LogFormat, LoggingConfig};

use crate::InfrastructureError;

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides the configured level when set. Returns `Ok(false)`
/// when a global subscriber was already installed, so repeated calls are
/// harmless.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool, InfrastructureError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    Ok(installed.is_ok())
}

pub(crate) fn level_filter(level: &str) -> Result<EnvFilter, InfrastructureError> {
    EnvFilter::try_new(level)
        .map_err(|e| InfrastructureError::Config(format!("Invalid log level '{}': {}", level, e)))
}
