//! Telemetry error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed, or the filter is invalid.
    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
