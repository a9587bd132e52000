//! Logging setup for storefront binaries.
//!
//! Libraries in this workspace only emit `tracing` events; binaries call
//! [`init_logging`] once at startup to decide where they go.

use thiserror::Error;

mod logging;

pub use logging::{build_env_filter, init_logging, LogFormat, LogLevel, LoggingConfig};

/// Errors raised while initialising observability.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// A global subscriber is already installed.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),

    /// The configured level is not a valid filter directive.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
}
