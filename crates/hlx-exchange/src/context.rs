//! Per-session execution context.

use crate::config::{ExchangeConfig, Network};

/// Account and session state applied to every action.
///
/// Holds no key material; signing keys stay inside the signature provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Never `Some("")`; an empty vault is stored as `None`.
    vault_address: Option<String>,
    account_address: Option<String>,
    network: Network,
    expires_after: Option<u64>,
}

impl ExecutionContext {
    pub fn new(network: Network) -> Self {
        Self {
            vault_address: None,
            account_address: None,
            network,
            expires_after: None,
        }
    }

    pub fn from_config(config: &ExchangeConfig) -> Self {
        Self {
            vault_address: non_empty(config.vault_address.clone()),
            account_address: non_empty(config.account_address.clone()),
            network: config.network(),
            expires_after: config.expires_after,
        }
    }

    #[must_use]
    pub fn with_vault_address(mut self, vault_address: impl Into<String>) -> Self {
        self.set_vault_address(Some(vault_address.into()));
        self
    }

    #[must_use]
    pub fn with_account_address(mut self, account_address: impl Into<String>) -> Self {
        self.account_address = non_empty(Some(account_address.into()));
        self
    }

    #[must_use]
    pub fn with_expires_after(mut self, expires_after: Option<u64>) -> Self {
        self.expires_after = expires_after;
        self
    }

    /// Reconfigure the vault; `None` or `""` trades for the own account.
    pub fn set_vault_address(&mut self, vault_address: Option<String>) {
        self.vault_address = non_empty(vault_address);
    }

    pub fn set_expires_after(&mut self, expires_after: Option<u64>) {
        self.expires_after = expires_after;
    }

    /// Configured vault, `None` when trading for the own account.
    pub fn vault_address(&self) -> Option<&str> {
        self.vault_address.as_deref()
    }

    pub fn account_address(&self) -> Option<&str> {
        self.account_address.as_deref()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn is_mainnet(&self) -> bool {
        self.network.is_mainnet()
    }

    pub fn expires_after(&self) -> Option<u64> {
        self.expires_after
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
