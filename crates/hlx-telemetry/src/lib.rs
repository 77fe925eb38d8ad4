//! Structured logging for the hlx exchange client.
//!
//! Pretty output for development, JSON when `RUST_ENV=production`.
//! `RUST_LOG` overrides the default filter.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{default_directives, init_logging, LogFormat};
