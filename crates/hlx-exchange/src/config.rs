//! Exchange configuration.
//!
//! [`ExchangeConfig`] is a plain struct (loadable from TOML) adjusted by an
//! ordered list of [`ExchangeOption`]s. Options are applied strictly in the
//! order given and later options override earlier ones on the same field.
//! No option is validated here: repeating `DebugMode` is harmless and an
//! unusable vault address only fails when an action is signed.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production API base URL. Any other base URL is treated as testnet.
pub const MAINNET_API_URL: &str = "https://api.hyperliquid.xyz";
pub const TESTNET_API_URL: &str = "https://api.hyperliquid-testnet.xyz";

/// Network selector; part of the signature domain separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Mainnet only for the exact production URL.
    pub fn from_base_url(base_url: &str) -> Self {
        if base_url == MAINNET_API_URL {
            Self::Mainnet
        } else {
            Self::Testnet
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Self::Mainnet)
    }
}

// =============================================================================
// HTTP client configuration
// =============================================================================

/// HTTP transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Log request paths and response bodies at debug level.
    #[serde(default)]
    pub debug: bool,
    /// Request timeout (ms). Default: 10,000.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debug: false,
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Option for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientOption {
    DebugMode,
    Timeout(Duration),
}

impl ClientConfig {
    /// Apply options in order.
    #[must_use]
    pub fn apply(mut self, options: impl IntoIterator<Item = ClientOption>) -> Self {
        for option in options {
            match option {
                ClientOption::DebugMode => self.debug = true,
                ClientOption::Timeout(timeout) => {
                    self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
                }
            }
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// =============================================================================
// Info client configuration
// =============================================================================

/// `/info` query client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoConfig {
    #[serde(default)]
    pub debug: bool,
    /// Transport used for info queries.
    #[serde(default)]
    pub client: ClientConfig,
}

/// Option for the info client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoOption {
    DebugMode,
    /// Forwarded to the info client's transport.
    ClientOptions(Vec<ClientOption>),
}

impl InfoConfig {
    /// Apply options in order.
    #[must_use]
    pub fn apply(mut self, options: impl IntoIterator<Item = InfoOption>) -> Self {
        for option in options {
            match option {
                InfoOption::DebugMode => self.debug = true,
                InfoOption::ClientOptions(client_options) => {
                    self.client = self.client.apply(client_options);
                }
            }
        }
        self
    }

    /// Transport configuration with the info debug flag forwarded.
    pub fn effective_client(&self) -> ClientConfig {
        let mut client = self.client.clone();
        client.debug |= self.debug;
        client
    }
}

// =============================================================================
// Exchange configuration
// =============================================================================

/// Exchange client configuration.
///
/// The signing key is deliberately not part of this struct; it is owned by
/// the signature provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// API base URL. Default: mainnet.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Vault to trade on behalf of. Empty or missing: own account.
    #[serde(default)]
    pub vault_address: Option<String>,
    /// Acting account when it differs from the key-derived address.
    #[serde(default)]
    pub account_address: Option<String>,
    /// Expiry (ms since epoch) attached to every action.
    #[serde(default)]
    pub expires_after: Option<u64>,
    /// Verbose logging; forwarded to the transport and info client.
    #[serde(default)]
    pub debug: bool,
    /// Transport for `/exchange`.
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub info: InfoConfig,
}

fn default_base_url() -> String {
    MAINNET_API_URL.to_string()
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            vault_address: None,
            account_address: None,
            expires_after: None,
            debug: false,
            client: ClientConfig::default(),
            info: InfoConfig::default(),
        }
    }
}

/// Option for the exchange client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOption {
    DebugMode,
    BaseUrl(String),
    VaultAddress(String),
    AccountAddress(String),
    ExpiresAfter(Option<u64>),
    /// Forwarded to the `/exchange` transport.
    ClientOptions(Vec<ClientOption>),
    /// Forwarded to the info client.
    InfoOptions(Vec<InfoOption>),
}

impl ExchangeConfig {
    pub fn mainnet() -> Self {
        Self::default()
    }

    pub fn testnet() -> Self {
        Self {
            base_url: TESTNET_API_URL.to_string(),
            ..Self::default()
        }
    }

    /// Apply options in order.
    ///
    /// Once all options are applied, exchange debug mode is forwarded to the
    /// transport and the info client.
    #[must_use]
    pub fn apply(mut self, options: impl IntoIterator<Item = ExchangeOption>) -> Self {
        for option in options {
            match option {
                ExchangeOption::DebugMode => self.debug = true,
                ExchangeOption::BaseUrl(url) => self.base_url = url,
                ExchangeOption::VaultAddress(vault) => self.vault_address = Some(vault),
                ExchangeOption::AccountAddress(account) => self.account_address = Some(account),
                ExchangeOption::ExpiresAfter(expires_after) => self.expires_after = expires_after,
                ExchangeOption::ClientOptions(client_options) => {
                    self.client = self.client.apply(client_options);
                }
                ExchangeOption::InfoOptions(info_options) => {
                    self.info = self.info.apply(info_options);
                }
            }
        }

        if self.debug {
            self.client.debug = true;
            self.info.debug = true;
        }
        self
    }

    /// Apply a single option.
    #[must_use]
    pub fn with(self, option: ExchangeOption) -> Self {
        self.apply([option])
    }

    pub fn network(&self) -> Network {
        Network::from_base_url(&self.base_url)
    }
}
