//! `tracing` subscriber initialisation

use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global `tracing` subscriber described by `config`.
///
/// `RUST_LOG` overrides `config.level` when present. Returns an error if a
/// global subscriber was already installed, so callers such as tests may
/// ignore the result.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.with_target)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(config.with_target)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(config.with_target)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
    }
}
