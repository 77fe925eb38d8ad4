//! Exchange actions.
//!
//! An [`Action`] is either one of the typed variants the client knows how to
//! build, or a [`RawAction`] carrying an arbitrary JSON object. Both expose
//! [`Action::kind`], read from the `type` discriminator, so envelope rules
//! that depend on the action kind behave the same for either representation.
//!
//! Typed actions serialize with `type` first followed by their fields in
//! exchange order; that byte layout is what gets hashed and signed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::order::Grouping;
use crate::wire::{BuilderInfo, CancelByCloidWire, CancelWire, ModifyWire, OrderRef, OrderWire};

// =============================================================================
// ActionKind
// =============================================================================

/// The `type` discriminator of an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Order,
    Cancel,
    CancelByCloid,
    Modify,
    BatchModify,
    ScheduleCancel,
    UpdateLeverage,
    UpdateIsolatedMargin,
    UsdClassTransfer,
    VaultTransfer,
    SetReferrer,
    Noop,
    /// A `type` string this crate has no typed variant for.
    Other(String),
    /// A raw action without a string `type` field.
    Unknown,
}

impl ActionKind {
    /// Map a wire `type` string to its kind.
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "order" => Self::Order,
            "cancel" => Self::Cancel,
            "cancelByCloid" => Self::CancelByCloid,
            "modify" => Self::Modify,
            "batchModify" => Self::BatchModify,
            "scheduleCancel" => Self::ScheduleCancel,
            "updateLeverage" => Self::UpdateLeverage,
            "updateIsolatedMargin" => Self::UpdateIsolatedMargin,
            "usdClassTransfer" => Self::UsdClassTransfer,
            "vaultTransfer" => Self::VaultTransfer,
            "setReferrer" => Self::SetReferrer,
            "noop" => Self::Noop,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire `type` string, `None` for [`ActionKind::Unknown`].
    pub fn as_type_tag(&self) -> Option<&str> {
        let tag = match self {
            Self::Order => "order",
            Self::Cancel => "cancel",
            Self::CancelByCloid => "cancelByCloid",
            Self::Modify => "modify",
            Self::BatchModify => "batchModify",
            Self::ScheduleCancel => "scheduleCancel",
            Self::UpdateLeverage => "updateLeverage",
            Self::UpdateIsolatedMargin => "updateIsolatedMargin",
            Self::UsdClassTransfer => "usdClassTransfer",
            Self::VaultTransfer => "vaultTransfer",
            Self::SetReferrer => "setReferrer",
            Self::Noop => "noop",
            Self::Other(tag) => tag.as_str(),
            Self::Unknown => return None,
        };
        Some(tag)
    }

    /// USD class transfers move funds between the spot and perp balances of
    /// the signing account and may never be attributed to a vault.
    pub fn is_usd_class_transfer(&self) -> bool {
        matches!(self, Self::UsdClassTransfer)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_type_tag().unwrap_or("<unknown>"))
    }
}

// =============================================================================
// Typed actions
// =============================================================================

/// Place one or more orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderAction {
    pub orders: Vec<OrderWire>,
    pub grouping: Grouping,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<BuilderInfo>,
}

/// Cancel orders by exchange order id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CancelAction {
    pub cancels: Vec<CancelWire>,
}

/// Cancel orders by client order id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CancelByCloidAction {
    pub cancels: Vec<CancelByCloidWire>,
}

/// Replace a single resting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModifyAction {
    pub oid: OrderRef,
    pub order: OrderWire,
}

/// Replace several resting orders atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchModifyAction {
    pub modifies: Vec<ModifyWire>,
}

/// Dead man's switch: cancel all orders at `time` (ms). `None` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleCancelAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateLeverageAction {
    pub asset: u32,
    #[serde(rename = "isCross")]
    pub is_cross: bool,
    pub leverage: u32,
}

/// Add (positive) or remove (negative) isolated margin, in micro-USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateIsolatedMarginAction {
    pub asset: u32,
    #[serde(rename = "isBuy")]
    pub is_buy: bool,
    pub ntli: i64,
}

/// Move USDC between the spot and perp balances.
///
/// `nonce` repeats the envelope nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsdClassTransferAction {
    pub amount: String,
    #[serde(rename = "toPerp")]
    pub to_perp: bool,
    pub nonce: u64,
}

/// Deposit into or withdraw from a vault, in micro-USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VaultTransferAction {
    #[serde(rename = "vaultAddress")]
    pub vault_address: String,
    #[serde(rename = "isDeposit")]
    pub is_deposit: bool,
    pub usd: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetReferrerAction {
    pub code: String,
}

/// Actions with a typed representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypedAction {
    Order(OrderAction),
    Cancel(CancelAction),
    CancelByCloid(CancelByCloidAction),
    Modify(ModifyAction),
    BatchModify(BatchModifyAction),
    ScheduleCancel(ScheduleCancelAction),
    UpdateLeverage(UpdateLeverageAction),
    UpdateIsolatedMargin(UpdateIsolatedMarginAction),
    UsdClassTransfer(UsdClassTransferAction),
    VaultTransfer(VaultTransferAction),
    SetReferrer(SetReferrerAction),
    Noop,
}

impl TypedAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Order(_) => ActionKind::Order,
            Self::Cancel(_) => ActionKind::Cancel,
            Self::CancelByCloid(_) => ActionKind::CancelByCloid,
            Self::Modify(_) => ActionKind::Modify,
            Self::BatchModify(_) => ActionKind::BatchModify,
            Self::ScheduleCancel(_) => ActionKind::ScheduleCancel,
            Self::UpdateLeverage(_) => ActionKind::UpdateLeverage,
            Self::UpdateIsolatedMargin(_) => ActionKind::UpdateIsolatedMargin,
            Self::UsdClassTransfer(_) => ActionKind::UsdClassTransfer,
            Self::VaultTransfer(_) => ActionKind::VaultTransfer,
            Self::SetReferrer(_) => ActionKind::SetReferrer,
            Self::Noop => ActionKind::Noop,
        }
    }
}

// =============================================================================
// Raw actions
// =============================================================================

/// Loosely-typed action: a JSON object passed through as-is.
///
/// Key order is preserved (serde_json `preserve_order`), so the signed bytes
/// match the object the caller built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAction(Map<String, Value>);

impl RawAction {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build from an arbitrary JSON value; `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self.0.get("type") {
            Some(Value::String(tag)) => ActionKind::from_type_tag(tag),
            _ => ActionKind::Unknown,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

// =============================================================================
// Action
// =============================================================================

/// An action submitted to the `/exchange` endpoint.
///
/// Deserialization tries the typed variants first and falls back to
/// [`RawAction`] for anything they do not match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Action {
    Typed(TypedAction),
    Raw(RawAction),
}

impl Action {
    /// The action's `type` discriminator, for every representation.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Typed(action) => action.kind(),
            Self::Raw(action) => action.kind(),
        }
    }

    pub fn order(orders: Vec<OrderWire>, grouping: Grouping) -> Self {
        OrderAction {
            orders,
            grouping,
            builder: None,
        }
        .into()
    }

    pub fn cancel(cancels: Vec<CancelWire>) -> Self {
        CancelAction { cancels }.into()
    }

    pub fn usd_class_transfer(amount: impl Into<String>, to_perp: bool, nonce: u64) -> Self {
        UsdClassTransferAction {
            amount: amount.into(),
            to_perp,
            nonce,
        }
        .into()
    }

    pub fn noop() -> Self {
        Self::Typed(TypedAction::Noop)
    }
}

impl From<TypedAction> for Action {
    fn from(action: TypedAction) -> Self {
        Self::Typed(action)
    }
}

impl From<RawAction> for Action {
    fn from(action: RawAction) -> Self {
        Self::Raw(action)
    }
}

macro_rules! impl_from_typed {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TypedAction {
                fn from(action: $ty) -> Self {
                    Self::$variant(action)
                }
            }

            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Self::Typed(TypedAction::$variant(action))
                }
            }
        )*
    };
}

impl_from_typed! {
    Order => OrderAction,
    Cancel => CancelAction,
    CancelByCloid => CancelByCloidAction,
    Modify => ModifyAction,
    BatchModify => BatchModifyAction,
    ScheduleCancel => ScheduleCancelAction,
    UpdateLeverage => UpdateLeverageAction,
    UpdateIsolatedMargin => UpdateIsolatedMarginAction,
    UsdClassTransfer => UsdClassTransferAction,
    VaultTransfer => VaultTransferAction,
    SetReferrer => SetReferrerAction,
}
