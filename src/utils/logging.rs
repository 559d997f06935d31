//! Tracing setup and logging helpers.

use crate::types::AppError;
use crate::utils::toml_config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level; `verbose` forces `debug`
/// for this crate. Logs go to stderr so command output on stdout stays
/// machine-readable.
pub fn init_tracing(config: &LoggingConfig, verbose: bool) -> Result<(), AppError> {
    let default_directive = if verbose {
        format!("{},mentor_review=debug", config.level)
    } else {
        config.level.clone()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_directive))
        .map_err(|e| AppError::Config(format!("invalid log level '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| AppError::Internal(format!("failed to install tracing subscriber: {}", e)))
}

/// Stable label for an error, used as a structured log field.
#[inline]
pub fn error_label(error: &AppError) -> &'static str {
    match error {
        AppError::Network(_) => "network",
        AppError::Backend { .. } => "backend",
        AppError::Decode(_) => "decode",
        AppError::NotFound(_) => "not_found",
        AppError::Validation(_) => "validation",
        AppError::InFlight(_) => "in_flight",
        AppError::Cancelled => "cancelled",
        AppError::Config(_) => "config",
        AppError::Internal(_) => "internal",
    }
}
