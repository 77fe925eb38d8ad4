//! Signed action execution against the Hyperliquid `/exchange` endpoint.
//!
//! Turns a typed [`Action`](hlx_core::Action) into a signed request envelope,
//! posts it and decodes the response into a caller-chosen type.
//!
//! # Key Components
//!
//! - [`ExchangeConfig`]: configuration struct plus ordered [`ExchangeOption`]s
//! - [`ExecutionContext`]: vault, account, network and expiry for a session
//! - [`PayloadBuilder`]: envelope shaping (vault / expiry field policy)
//! - [`ActionExecutor`]: clock -> sign -> build -> post -> decode
//! - [`Transport`]: HTTP seam, [`HttpTransport`] in production
//! - [`InfoClient`]: generic read-only `/info` queries
//! - [`Exchange`]: facade with typed convenience calls
//!
//! # Envelope rules
//!
//! 1. `action`, `nonce`, `signature` always present
//! 2. vault configured: `vaultAddress` = vault, or explicit `null` for
//!    `usdClassTransfer`; no vault: key omitted
//! 3. expiry configured: `expiresAfter` = expiry

pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod exchange;
pub mod executor;
pub mod field;
pub mod info;
pub mod payload;
pub mod response;
pub mod transport;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    ClientConfig, ClientOption, ExchangeConfig, ExchangeOption, InfoConfig, InfoOption, Network,
    MAINNET_API_URL, TESTNET_API_URL,
};
pub use context::ExecutionContext;
pub use error::{BuildError, ExchangeError, ExchangeResult, InfoError, TransportError};
pub use exchange::Exchange;
pub use executor::{ActionExecutor, EXCHANGE_PATH};
pub use field::WireField;
pub use info::{InfoClient, InfoRequest, INFO_PATH};
pub use payload::{PayloadBuilder, RequestEnvelope};
pub use response::{ExchangeResponse, FilledOrder, OrderStatus, ResponseDetails, RestingOrder};
pub use transport::{DynTransport, HttpTransport, MockTransport, RecordedPost, Transport};
