//! Error types for hlx-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Value {value} cannot be represented with {max_decimals} decimals")]
    Precision { value: String, max_decimals: u32 },

    #[error("Invalid client order id: {0}")]
    InvalidCloid(String),

    #[error("Decimal parse error: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
