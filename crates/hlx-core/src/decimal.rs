//! Decimal to wire-string conversion.
//!
//! The exchange hashes prices and sizes as strings, so `"105"` and `"105.0"`
//! produce different signatures. Every numeric field is normalized here
//! before it enters an action.

use rust_decimal::Decimal;

use crate::error::{CoreError, Result};

/// Maximum decimals accepted by the exchange for prices and sizes.
pub const WIRE_MAX_DECIMALS: u32 = 8;

/// Format a decimal for the wire: at most 8 decimals, no trailing zeros.
///
/// Fails instead of silently rounding when the value carries more precision
/// than the exchange accepts.
pub fn to_wire(value: Decimal) -> Result<String> {
    let rounded = value.round_dp(WIRE_MAX_DECIMALS);
    if rounded != value {
        return Err(CoreError::Precision {
            value: value.to_string(),
            max_decimals: WIRE_MAX_DECIMALS,
        });
    }

    let normalized = rounded.normalize();
    // normalize() keeps the sign of zero ("-0")
    if normalized.is_zero() {
        return Ok("0".to_string());
    }
    Ok(normalized.to_string())
}
