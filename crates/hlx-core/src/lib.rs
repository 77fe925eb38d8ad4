//! Core types for the Hyperliquid exchange client.
//!
//! This crate provides the values that travel to the `/exchange` endpoint:
//! - `Action`: closed set of typed actions plus a raw JSON escape hatch
//! - `ActionKind`: the `type` discriminator, available for every representation
//! - `OrderWire`, `CancelWire`, ...: compact wire formats used inside actions
//! - `Cloid`: 128-bit client order identifiers

pub mod action;
pub mod decimal;
pub mod error;
pub mod order;
pub mod wire;

pub use action::{
    Action, ActionKind, BatchModifyAction, CancelAction, CancelByCloidAction, ModifyAction,
    OrderAction, RawAction, ScheduleCancelAction, SetReferrerAction, TypedAction,
    UpdateIsolatedMarginAction, UpdateLeverageAction, UsdClassTransferAction,
    VaultTransferAction,
};
pub use decimal::to_wire;
pub use error::{CoreError, Result};
pub use order::{Cloid, Grouping, TimeInForce, Tpsl};
pub use wire::{
    BuilderInfo, CancelByCloidWire, CancelWire, LimitOrderType, ModifyWire, OrderRef,
    OrderTypeWire, OrderWire, TriggerOrderType,
};
