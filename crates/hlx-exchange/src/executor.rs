//! Signed action executor.
//!
//! One call runs strictly in sequence:
//!
//! 1. read the clock once; that value is the nonce
//! 2. sign (action, vault, nonce, expiry, network)
//! 3. shape the envelope
//! 4. post to `/exchange`
//! 5. decode the body into the caller's type
//!
//! Any failing step stops the pipeline. No step is retried.

use std::sync::Arc;

use hlx_core::Action;
use hlx_signer::{SignRequest, SignatureProvider};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::context::ExecutionContext;
use crate::error::{ExchangeError, ExchangeResult, TransportError};
use crate::payload::PayloadBuilder;
use crate::transport::Transport;

/// Path of the signed action endpoint.
pub const EXCHANGE_PATH: &str = "/exchange";

/// Executes actions against `/exchange`.
///
/// Concurrent calls are allowed; each reads the clock independently, so two
/// calls within the same millisecond share a nonce.
pub struct ActionExecutor {
    context: ExecutionContext,
    signer: Arc<dyn SignatureProvider>,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ActionExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionExecutor")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl ActionExecutor {
    pub fn new(
        context: ExecutionContext,
        signer: Arc<dyn SignatureProvider>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            context,
            signer,
            transport,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the nonce clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Reconfigure vault or expiry between calls.
    pub fn context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.context
    }

    /// Sign, post and decode one action.
    pub async fn execute<R>(&self, action: impl Into<Action>) -> ExchangeResult<R>
    where
        R: DeserializeOwned,
    {
        let action = action.into();
        self.execute_with_nonce(|_| action).await
    }

    /// Like [`execute`](Self::execute), for actions that carry the nonce
    /// themselves. `build` receives the nonce that is signed and posted.
    pub async fn execute_with_nonce<R, F>(&self, build: F) -> ExchangeResult<R>
    where
        R: DeserializeOwned,
        F: FnOnce(u64) -> Action,
    {
        let nonce = self.clock.now_ms();
        let action = build(nonce);
        let kind = action.kind();

        let signature = self
            .signer
            .sign(SignRequest {
                action: &action,
                vault_address: self.context.vault_address(),
                nonce,
                expires_after: self.context.expires_after(),
                is_mainnet: self.context.is_mainnet(),
            })
            .await?;

        let envelope = PayloadBuilder::build(action, signature, nonce, &self.context);
        let body = serde_json::to_value(&envelope)
            .map_err(|e| TransportError::Serialization(e.to_string()))?;

        debug!(
            kind = %kind,
            nonce,
            vault = envelope.vault_address.as_present().is_some(),
            "Posting action"
        );

        let bytes = self.transport.post(EXCHANGE_PATH, body).await?;

        serde_json::from_slice(&bytes).map_err(|source| ExchangeError::Decode {
            source,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
