//! CLI configuration file.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use hlx_exchange::ExchangeConfig;
use hlx_signer::{Address, KeySource};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Default config path when neither `--config` nor `HLX_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub key: KeyConfig,
}

/// Where the signing key comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConfig {
    /// Environment variable holding the hex key. Default: `HLX_PRIVATE_KEY`.
    #[serde(default = "default_key_env_var")]
    pub env_var: String,
    /// Key file; takes precedence over `env_var` when set.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Expected signer address (0x...).
    #[serde(default)]
    pub expected_address: Option<String>,
}

fn default_key_env_var() -> String {
    "HLX_PRIVATE_KEY".to_string()
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            env_var: default_key_env_var(),
            file: None,
            expected_address: None,
        }
    }
}

impl KeyConfig {
    pub fn source(&self) -> KeySource {
        match &self.file {
            Some(path) => KeySource::File { path: path.clone() },
            None => KeySource::EnvVar {
                var_name: self.env_var.clone(),
            },
        }
    }

    pub fn expected_address(&self) -> AppResult<Option<Address>> {
        self.expected_address
            .as_deref()
            .map(|address| {
                Address::from_str(address).map_err(|e| {
                    AppError::Config(format!("Invalid expected_address {address}: {e}"))
                })
            })
            .transpose()
    }
}

impl CliConfig {
    /// Load from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hlx_exchange::Network;

    #[test]
    fn test_empty_config_defaults() {
        let config = CliConfig::from_toml("").unwrap();
        assert!(config.exchange.network().is_mainnet());
        assert_eq!(
            config.key.source(),
            KeySource::EnvVar {
                var_name: "HLX_PRIVATE_KEY".to_string()
            }
        );
        assert_eq!(config.key.expected_address().unwrap(), None);
    }

    #[test]
    fn test_full_config() {
        let config = CliConfig::from_toml(
            r#"
            [exchange]
            base_url = "https://api.hyperliquid-testnet.xyz"
            vault_address = "0x1111111111111111111111111111111111111111"
            expires_after = 1900000000000

            [exchange.client]
            timeout_ms = 2500

            [key]
            file = "/tmp/key.hex"
            expected_address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            "#,
        )
        .unwrap();

        assert_eq!(config.exchange.network(), Network::Testnet);
        assert_eq!(config.exchange.expires_after, Some(1_900_000_000_000));
        assert_eq!(config.exchange.client.timeout_ms, 2500);
        assert_eq!(
            config.key.source(),
            KeySource::File {
                path: PathBuf::from("/tmp/key.hex")
            }
        );
        assert!(config.key.expected_address().unwrap().is_some());
    }

    #[test]
    fn test_invalid_expected_address() {
        let key = KeyConfig {
            expected_address: Some("0xnope".to_string()),
            ..KeyConfig::default()
        };
        assert!(matches!(key.expected_address(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            CliConfig::from_toml("[exchange\n"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CliConfig::from_file("/nonexistent/hlx.toml"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_bundled_config_parses() {
        let content = include_str!("../config/default.toml");
        let config = CliConfig::from_toml(content).unwrap();
        assert_eq!(config.exchange.network(), Network::Testnet);
    }
}
