//! Signing key loading.

use std::fmt;
use std::path::PathBuf;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use thiserror::Error;
use zeroize::Zeroizing;

/// Source of the private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Load from environment variable (development).
    EnvVar { var_name: String },
    /// Load from file (production, recommend 0600 permissions).
    File { path: PathBuf },
}

/// Owns the signing key.
///
/// Security notes:
/// - The key lives inside `PrivateKeySigner`; intermediate hex and byte
///   buffers are zeroized on drop.
/// - Keys are loaded once at startup; no runtime key rotation.
/// - `Debug` prints the derived address only.
pub struct KeyManager {
    signer: PrivateKeySigner,
}

impl KeyManager {
    /// Load the key from the specified source and verify its address.
    ///
    /// # Errors
    /// Returns `KeyError` if:
    /// - Environment variable not found
    /// - File read fails
    /// - Hex decoding fails
    /// - Private key is invalid
    /// - Address mismatch
    pub fn load(source: &KeySource, expected_address: Option<Address>) -> Result<Self, KeyError> {
        let hex_key: Zeroizing<String> = match source {
            KeySource::EnvVar { var_name } => Zeroizing::new(
                std::env::var(var_name).map_err(|_| KeyError::EnvVarNotFound(var_name.clone()))?,
            ),
            KeySource::File { path } => Zeroizing::new(std::fs::read_to_string(path)?),
        };

        let secret_bytes = parse_hex_key(&hex_key)?;
        Self::from_bytes(&secret_bytes, expected_address)
    }

    /// Build from raw key bytes.
    pub fn from_bytes(
        secret_bytes: &[u8],
        expected_address: Option<Address>,
    ) -> Result<Self, KeyError> {
        let signer = PrivateKeySigner::from_slice(secret_bytes)
            .map_err(|e| KeyError::InvalidKey(e.to_string()))?;

        if let Some(expected) = expected_address {
            if signer.address() != expected {
                return Err(KeyError::AddressMismatch {
                    expected,
                    actual: signer.address(),
                });
            }
        }

        Ok(Self { signer })
    }

    /// Build from a hex string (`0x` prefix and surrounding whitespace allowed).
    pub fn from_hex(hex_key: &str, expected_address: Option<Address>) -> Result<Self, KeyError> {
        let secret_bytes = parse_hex_key(hex_key)?;
        Self::from_bytes(&secret_bytes, expected_address)
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Address derived from the key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

impl fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyManager")
            .field("address", &self.signer.address())
            .finish_non_exhaustive()
    }
}

fn parse_hex_key(hex_str: &str) -> Result<Zeroizing<Vec<u8>>, KeyError> {
    let trimmed = hex_str.trim().trim_start_matches("0x");
    Ok(Zeroizing::new(hex::decode(trimmed)?))
}

/// Key management errors.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Failed to decode hex: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Address mismatch: expected {expected}, got {actual}")]
    AddressMismatch { expected: Address, actual: Address },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
