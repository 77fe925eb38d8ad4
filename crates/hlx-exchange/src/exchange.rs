//! Exchange facade.

use std::sync::Arc;

use hlx_core::{
    to_wire, Action, BatchModifyAction, BuilderInfo, CancelByCloidAction, CancelByCloidWire,
    CancelWire, Grouping, ModifyAction, ModifyWire, OrderAction, OrderRef, OrderWire,
    ScheduleCancelAction, SetReferrerAction, UpdateIsolatedMarginAction, UpdateLeverageAction,
    UsdClassTransferAction, VaultTransferAction,
};
use hlx_signer::{Address, KeyManager, KeySource, SignatureProvider, Signer};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::ExchangeConfig;
use crate::context::ExecutionContext;
use crate::error::{BuildError, ExchangeResult};
use crate::executor::ActionExecutor;
use crate::info::InfoClient;
use crate::response::ExchangeResponse;
use crate::transport::HttpTransport;

/// Signed-action client with typed convenience calls.
#[derive(Debug)]
pub struct Exchange {
    executor: ActionExecutor,
    info: InfoClient,
}

impl Exchange {
    /// Build HTTP transports for `/exchange` and `/info` from `config`.
    pub fn new(
        config: &ExchangeConfig,
        signer: Arc<dyn SignatureProvider>,
    ) -> Result<Self, BuildError> {
        let exchange_transport = HttpTransport::new(&config.base_url, &config.client)?;
        let info = InfoClient::from_config(config)?;

        let context = ExecutionContext::from_config(config);
        info!(
            base_url = %config.base_url,
            network = ?context.network(),
            vault = context.vault_address().is_some(),
            "Exchange client created"
        );

        Ok(Self {
            executor: ActionExecutor::new(context, signer, Arc::new(exchange_transport)),
            info,
        })
    }

    /// Load the key from `source` and sign locally.
    pub fn with_key(
        config: &ExchangeConfig,
        source: &KeySource,
        expected_address: Option<Address>,
    ) -> Result<Self, BuildError> {
        let key_manager = KeyManager::load(source, expected_address)?;
        info!(address = %key_manager.address(), "Signing key loaded");
        Self::new(config, Arc::new(Signer::new(Arc::new(key_manager))))
    }

    pub fn from_parts(executor: ActionExecutor, info: InfoClient) -> Self {
        Self { executor, info }
    }

    pub fn executor(&self) -> &ActionExecutor {
        &self.executor
    }

    pub fn info(&self) -> &InfoClient {
        &self.info
    }

    pub fn context(&self) -> &ExecutionContext {
        self.executor.context()
    }

    /// `None` or `""` trades for the own account.
    pub fn set_vault_address(&mut self, vault_address: Option<String>) {
        self.executor.context_mut().set_vault_address(vault_address);
    }

    pub fn set_expires_after(&mut self, expires_after: Option<u64>) {
        self.executor.context_mut().set_expires_after(expires_after);
    }

    /// Execute any action, decoding into `R`.
    pub async fn execute<R: DeserializeOwned>(
        &self,
        action: impl Into<Action>,
    ) -> ExchangeResult<R> {
        self.executor.execute(action).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub async fn place_orders(
        &self,
        orders: Vec<OrderWire>,
        grouping: Grouping,
        builder: Option<BuilderInfo>,
    ) -> ExchangeResult<ExchangeResponse> {
        self.execute(OrderAction {
            orders,
            grouping,
            builder,
        })
        .await
    }

    pub async fn cancel(&self, cancels: Vec<CancelWire>) -> ExchangeResult<ExchangeResponse> {
        self.execute(Action::cancel(cancels)).await
    }

    pub async fn cancel_by_cloid(
        &self,
        cancels: Vec<CancelByCloidWire>,
    ) -> ExchangeResult<ExchangeResponse> {
        self.execute(CancelByCloidAction { cancels }).await
    }

    pub async fn modify_order(
        &self,
        oid: OrderRef,
        order: OrderWire,
    ) -> ExchangeResult<ExchangeResponse> {
        self.execute(ModifyAction { oid, order }).await
    }

    pub async fn batch_modify(
        &self,
        modifies: Vec<ModifyWire>,
    ) -> ExchangeResult<ExchangeResponse> {
        self.execute(BatchModifyAction { modifies }).await
    }

    /// Cancel everything at `time` (ms); `None` clears the schedule.
    pub async fn schedule_cancel(&self, time: Option<u64>) -> ExchangeResult<ExchangeResponse> {
        self.execute(ScheduleCancelAction { time }).await
    }

    // =========================================================================
    // Account
    // =========================================================================

    pub async fn update_leverage(
        &self,
        asset: u32,
        is_cross: bool,
        leverage: u32,
    ) -> ExchangeResult<ExchangeResponse> {
        self.execute(UpdateLeverageAction {
            asset,
            is_cross,
            leverage,
        })
        .await
    }

    /// `ntli` is in micro-USD; negative removes margin.
    pub async fn update_isolated_margin(
        &self,
        asset: u32,
        is_buy: bool,
        ntli: i64,
    ) -> ExchangeResult<ExchangeResponse> {
        self.execute(UpdateIsolatedMarginAction {
            asset,
            is_buy,
            ntli,
        })
        .await
    }

    /// Sent with `vaultAddress: null` whenever a vault is configured.
    pub async fn usd_class_transfer(
        &self,
        amount: Decimal,
        to_perp: bool,
    ) -> ExchangeResult<ExchangeResponse> {
        let amount = to_wire(amount)?;
        self.executor
            .execute_with_nonce(|nonce| {
                UsdClassTransferAction {
                    amount,
                    to_perp,
                    nonce,
                }
                .into()
            })
            .await
    }

    /// `usd` is in micro-USD.
    pub async fn vault_transfer(
        &self,
        vault_address: impl Into<String>,
        is_deposit: bool,
        usd: u64,
    ) -> ExchangeResult<ExchangeResponse> {
        self.execute(VaultTransferAction {
            vault_address: vault_address.into(),
            is_deposit,
            usd,
        })
        .await
    }

    pub async fn set_referrer(&self, code: impl Into<String>) -> ExchangeResult<ExchangeResponse> {
        self.execute(SetReferrerAction { code: code.into() }).await
    }
}
