//! Compact wire formats embedded in exchange actions.
//!
//! Field names and field order follow the exchange's own encoding: the
//! msgpack bytes of an action feed the action hash, so reordering a field
//! here changes every signature.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::to_wire;
use crate::error::Result;
use crate::order::{Cloid, TimeInForce, Tpsl};

/// Order wire format.
///
/// Example: `{"a":0,"b":true,"p":"105","s":"0.2","r":false,"t":{"limit":{"tif":"Ioc"}}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderWire {
    /// Asset index
    #[serde(rename = "a")]
    pub asset: u32,

    /// Buy (true) or Sell (false)
    #[serde(rename = "b")]
    pub is_buy: bool,

    /// Limit price as string
    #[serde(rename = "p")]
    pub limit_px: String,

    /// Size as string
    #[serde(rename = "s")]
    pub sz: String,

    /// Reduce-only flag
    #[serde(rename = "r")]
    pub reduce_only: bool,

    /// Order type
    #[serde(rename = "t")]
    pub order_type: OrderTypeWire,

    /// Client order ID (omitted when None)
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub cloid: Option<Cloid>,
}

impl OrderWire {
    /// Build a limit order from decimal price and size.
    pub fn limit(
        asset: u32,
        is_buy: bool,
        price: Decimal,
        size: Decimal,
        tif: TimeInForce,
    ) -> Result<Self> {
        Ok(Self {
            asset,
            is_buy,
            limit_px: to_wire(price)?,
            sz: to_wire(size)?,
            reduce_only: false,
            order_type: OrderTypeWire::Limit {
                limit: LimitOrderType { tif },
            },
            cloid: None,
        })
    }

    /// Build a trigger (TP/SL) order.
    ///
    /// `price` is the limit price used once the trigger fires; it is ignored
    /// by the exchange when `is_market` is set but still signed.
    #[allow(clippy::too_many_arguments)]
    pub fn trigger(
        asset: u32,
        is_buy: bool,
        price: Decimal,
        size: Decimal,
        trigger_px: Decimal,
        is_market: bool,
        tpsl: Tpsl,
    ) -> Result<Self> {
        Ok(Self {
            asset,
            is_buy,
            limit_px: to_wire(price)?,
            sz: to_wire(size)?,
            reduce_only: false,
            order_type: OrderTypeWire::Trigger {
                trigger: TriggerOrderType {
                    is_market,
                    trigger_px: to_wire(trigger_px)?,
                    tpsl,
                },
            },
            cloid: None,
        })
    }

    /// Mark the order reduce-only.
    #[must_use]
    pub fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }

    /// Attach a client order ID.
    #[must_use]
    pub fn with_cloid(mut self, cloid: Cloid) -> Self {
        self.cloid = Some(cloid);
        self
    }
}

/// Order type wire format.
///
/// - Limit: `{"limit": {"tif": "Gtc"|"Ioc"|"Alo"}}`
/// - Trigger: `{"trigger": {"isMarket": true, "triggerPx": "...", "tpsl": "tp"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderTypeWire {
    Limit { limit: LimitOrderType },
    Trigger { trigger: TriggerOrderType },
}

impl OrderTypeWire {
    pub fn ioc() -> Self {
        Self::Limit {
            limit: LimitOrderType {
                tif: TimeInForce::ImmediateOrCancel,
            },
        }
    }

    pub fn gtc() -> Self {
        Self::Limit {
            limit: LimitOrderType {
                tif: TimeInForce::GoodTilCancelled,
            },
        }
    }

    pub fn alo() -> Self {
        Self::Limit {
            limit: LimitOrderType {
                tif: TimeInForce::AddLiquidityOnly,
            },
        }
    }
}

/// Limit order type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitOrderType {
    pub tif: TimeInForce,
}

/// Trigger order type.
///
/// Field order must stay isMarket -> triggerPx -> tpsl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerOrderType {
    #[serde(rename = "isMarket")]
    pub is_market: bool,

    #[serde(rename = "triggerPx")]
    pub trigger_px: String,

    pub tpsl: Tpsl,
}

/// Cancel by exchange order id: `{"a": 5, "o": 123456789}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CancelWire {
    #[serde(rename = "a")]
    pub asset: u32,

    #[serde(rename = "o")]
    pub oid: u64,
}

/// Cancel by client order id: `{"asset": 5, "cloid": "0x..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CancelByCloidWire {
    pub asset: u32,
    pub cloid: Cloid,
}

/// Reference to a resting order, either by exchange id or client id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderRef {
    Oid(u64),
    Cloid(Cloid),
}

impl From<u64> for OrderRef {
    fn from(oid: u64) -> Self {
        Self::Oid(oid)
    }
}

impl From<Cloid> for OrderRef {
    fn from(cloid: Cloid) -> Self {
        Self::Cloid(cloid)
    }
}

/// One entry of a `batchModify` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModifyWire {
    pub oid: OrderRef,
    pub order: OrderWire,
}

/// Builder fee attribution attached to `order` actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuilderInfo {
    /// Builder address
    #[serde(rename = "b")]
    pub address: String,
    /// Fee in tenths of a basis point
    #[serde(rename = "f")]
    pub fee: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_type_wire_serialization() {
        let json = serde_json::to_string(&OrderTypeWire::ioc()).unwrap();
        assert_eq!(json, r#"{"limit":{"tif":"Ioc"}}"#);

        let json = serde_json::to_string(&OrderTypeWire::gtc()).unwrap();
        assert_eq!(json, r#"{"limit":{"tif":"Gtc"}}"#);
    }

    #[test]
    fn test_trigger_field_order() {
        let order = OrderWire::trigger(
            3,
            false,
            dec!(1800.50),
            dec!(0.5),
            dec!(1801.0),
            true,
            Tpsl::Sl,
        )
        .unwrap();

        let json = serde_json::to_string(&order.order_type).unwrap();
        assert_eq!(
            json,
            r#"{"trigger":{"isMarket":true,"triggerPx":"1801","tpsl":"sl"}}"#
        );
        assert_eq!(order.limit_px, "1800.5");
    }

    #[test]
    fn test_limit_order_wire_format() {
        let cloid: Cloid = "0x0de3e244a8f44fc28a6b7bc852d66d19".parse().unwrap();
        let order = OrderWire::limit(
            110027,
            true,
            dec!(105.00),
            dec!(0.2),
            TimeInForce::ImmediateOrCancel,
        )
        .unwrap()
        .with_cloid(cloid);

        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(
            json,
            r#"{"a":110027,"b":true,"p":"105","s":"0.2","r":false,"t":{"limit":{"tif":"Ioc"}},"c":"0x0de3e244a8f44fc28a6b7bc852d66d19"}"#
        );
    }

    #[test]
    fn test_cloid_omitted_when_none() {
        let order =
            OrderWire::limit(0, true, dec!(1), dec!(1), TimeInForce::GoodTilCancelled).unwrap();
        let json = serde_json::to_string(&order).unwrap();
        assert!(!json.contains("\"c\""));
    }

    #[test]
    fn test_reduce_only_builder() {
        let order = OrderWire::limit(1, false, dec!(10), dec!(2), TimeInForce::AddLiquidityOnly)
            .unwrap()
            .reduce_only();
        assert!(order.reduce_only);
    }

    #[test]
    fn test_order_ref_untagged() {
        let by_oid = serde_json::to_string(&OrderRef::from(42u64)).unwrap();
        assert_eq!(by_oid, "42");

        let cloid: Cloid = "0x00000000000000000000000000000001".parse().unwrap();
        let by_cloid = serde_json::to_string(&OrderRef::from(cloid)).unwrap();
        assert_eq!(by_cloid, r#""0x00000000000000000000000000000001""#);
    }
}
