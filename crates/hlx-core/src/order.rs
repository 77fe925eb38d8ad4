//! Order-related enums and client order identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

/// Time-in-force for limit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good-til-cancelled.
    #[default]
    #[serde(rename = "Gtc")]
    GoodTilCancelled,
    /// Immediate-or-cancel.
    #[serde(rename = "Ioc")]
    ImmediateOrCancel,
    /// Add-liquidity-only (post only).
    #[serde(rename = "Alo")]
    AddLiquidityOnly,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoodTilCancelled => write!(f, "Gtc"),
            Self::ImmediateOrCancel => write!(f, "Ioc"),
            Self::AddLiquidityOnly => write!(f, "Alo"),
        }
    }
}

/// Take-profit or stop-loss marker for trigger orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tpsl {
    Tp,
    Sl,
}

/// Order grouping for `order` actions.
///
/// `na` for independent orders; the TP/SL groupings link children to a parent
/// order or to the open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Grouping {
    #[default]
    Na,
    NormalTpsl,
    PositionTpsl,
}

/// Client order ID.
///
/// The exchange expects 16 bytes rendered as `0x` followed by 32 lowercase
/// hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cloid(String);

impl Cloid {
    /// Create a new random client order ID.
    pub fn new() -> Self {
        Self::from_bytes(*Uuid::new_v4().as_bytes())
    }

    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Cloid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Cloid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cloid {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| CoreError::InvalidCloid(s.to_string()))?;
        let bytes =
            hex::decode(digits).map_err(|_| CoreError::InvalidCloid(s.to_string()))?;
        let bytes: [u8; 16] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidCloid(s.to_string()))?;
        Ok(Self::from_bytes(bytes))
    }
}

impl TryFrom<String> for Cloid {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Cloid> for String {
    fn from(cloid: Cloid) -> Self {
        cloid.0
    }
}

impl AsRef<str> for Cloid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
