//! Command-line client for the hlx exchange crates.

pub mod commands;
pub mod config;
pub mod error;

pub use config::{CliConfig, KeyConfig, DEFAULT_CONFIG_PATH};
pub use error::{AppError, AppResult};
