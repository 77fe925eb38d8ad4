//! Exchange error types.

use hlx_core::CoreError;
use hlx_signer::{KeyError, SignerError};
use thiserror::Error;

/// Failures of the HTTP seam.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request serialization failed: {0}")]
    Serialization(String),
}

/// Failures of a single action execution.
///
/// Exactly one of these is returned when `execute` fails; none is retried
/// or logged on the way out.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Signing error: {0}")]
    Signing(#[from] SignerError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Raw response body, lossily decoded as UTF-8.
        body: String,
    },

    /// Convenience call arguments that cannot be put on the wire.
    /// Never produced by `ActionExecutor::execute`.
    #[error("Invalid input: {0}")]
    Input(#[from] CoreError),
}

impl ExchangeError {
    pub fn is_signing(&self) -> bool {
        matches!(self, Self::Signing(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Failures of an `/info` query.
#[derive(Debug, Error)]
pub enum InfoError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

/// Construction-time failures.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
