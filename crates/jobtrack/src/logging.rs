//! Subscriber setup for hosts embedding the tracker.
//!
//! Library code logs through the `log` facade and opens `tracing` spans;
//! [`init`] routes both into one `tracing-subscriber` fmt layer.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ConfigError;

/// Directive used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "jobtrack=info";

/// Installs the global subscriber. `RUST_LOG` wins over `default_directive`.
/// Fails if a subscriber or logger is already installed.
pub fn init(default_directive: &str) -> Result<(), ConfigError> {
    let filter = build_filter(default_directive)?;

    tracing_log::LogTracer::init().map_err(|e| ConfigError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))
}

fn build_filter(default_directive: &str) -> Result<EnvFilter, ConfigError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|e| ConfigError::Logging(format!("invalid directive: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_default() {
        assert!(build_filter(DEFAULT_DIRECTIVE).is_ok());
    }
}
