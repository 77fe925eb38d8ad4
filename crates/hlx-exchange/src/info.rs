//! Read-only `/info` queries.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ExchangeConfig;
use crate::error::{InfoError, TransportError};
use crate::transport::{HttpTransport, Transport};

/// Path of the info endpoint.
pub const INFO_PATH: &str = "/info";

/// Common info request: a `type` with optional user and dex.
///
/// ```json
/// {"type": "clearinghouseState", "user": "0x...", "dex": "xyz"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoRequest {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// DEX name for builder-deployed perps (e.g., "xyz").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dex: Option<String>,
}

impl InfoRequest {
    pub fn new(request_type: impl Into<String>) -> Self {
        Self {
            request_type: request_type.into(),
            user: None,
            dex: None,
        }
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn dex(mut self, dex: impl Into<String>) -> Self {
        self.dex = Some(dex.into());
        self
    }
}

/// Client for unsigned `/info` queries.
pub struct InfoClient {
    transport: Arc<dyn Transport>,
    debug: bool,
}

impl std::fmt::Debug for InfoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfoClient")
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl InfoClient {
    pub fn new(transport: Arc<dyn Transport>, debug: bool) -> Self {
        Self { transport, debug }
    }

    /// HTTP client for the configured base URL; needs no signing key.
    pub fn from_config(config: &ExchangeConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.base_url, &config.info.effective_client())?;
        Ok(Self::new(Arc::new(transport), config.info.debug))
    }

    /// Post `request` to `/info` and decode the response.
    pub async fn query<Q, R>(&self, request: &Q) -> Result<R, InfoError>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(request)
            .map_err(|e| TransportError::Serialization(e.to_string()))?;
        if self.debug {
            debug!(request = %body, "Info query");
        }

        let bytes = self.transport.post(INFO_PATH, body).await?;

        serde_json::from_slice(&bytes).map_err(|source| InfoError::Decode {
            source,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Open orders of `user`.
    pub async fn open_orders<R: DeserializeOwned>(&self, user: &str) -> Result<R, InfoError> {
        self.query(&InfoRequest::new("openOrders").user(user)).await
    }

    /// Perp account state of `user`, optionally on a builder dex.
    pub async fn clearinghouse_state<R: DeserializeOwned>(
        &self,
        user: &str,
        dex: Option<&str>,
    ) -> Result<R, InfoError> {
        let mut request = InfoRequest::new("clearinghouseState").user(user);
        request.dex = dex.map(str::to_string);
        self.query(&request).await
    }

    /// Perp universe metadata.
    pub async fn meta<R: DeserializeOwned>(&self) -> Result<R, InfoError> {
        self.query(&InfoRequest::new("meta")).await
    }
}
