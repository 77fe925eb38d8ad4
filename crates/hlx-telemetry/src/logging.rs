//! Structured logging initialization.

use crate::error::{TelemetryError, TelemetryResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, multi-line.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// `Json` when `RUST_ENV=production`, `Pretty` otherwise.
    pub fn from_env() -> Self {
        Self::from_rust_env(std::env::var("RUST_ENV").ok().as_deref())
    }

    fn from_rust_env(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "info,hlx=trace"
    } else {
        "info,hlx=debug"
    }
}

/// Install the global tracing subscriber.
///
/// `debug` raises the crate's own targets to trace level. Fails when a
/// subscriber is already installed.
pub fn init_logging(debug: bool) -> TelemetryResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    let result = match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_target(true))
            .try_init(),
    };

    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}
