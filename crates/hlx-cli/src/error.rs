//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Client setup error: {0}")]
    Build(#[from] hlx_exchange::BuildError),

    #[error("Exchange error: {0}")]
    Exchange(#[from] hlx_exchange::ExchangeError),

    #[error("Info error: {0}")]
    Info(#[from] hlx_exchange::InfoError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] hlx_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
