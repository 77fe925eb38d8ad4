//! L1 action signing.
//!
//! Two stages:
//! 1. Calculate `action_hash` from Action + nonce + vault_address + expires_after
//! 2. Sign a `phantom_agent` wrapping that hash using EIP-712

use std::sync::Arc;

use alloy::primitives::{keccak256, Address, PrimitiveSignature, B256};
use alloy::signers::Signer as AlloySigner;
use alloy::sol;
use alloy::sol_types::eip712_domain;
use alloy::sol_types::SolStruct;
use hlx_core::Action;
use thiserror::Error;
use tracing::debug;

use crate::key::KeyManager;
use crate::provider::{BoxFuture, SignRequest, SignatureProvider, SignatureResult};

// =============================================================================
// SigningInput and action_hash
// =============================================================================

/// Signing input parameters.
#[derive(Debug, Clone)]
pub struct SigningInput<'a> {
    pub action: &'a Action,
    pub nonce: u64,
    /// None = own account, Some = vault trading
    pub vault_address: Option<Address>,
    pub expires_after: Option<u64>,
}

impl<'a> SigningInput<'a> {
    /// Build from a provider request, parsing the vault address.
    ///
    /// # Errors
    /// Returns `SignerError::InvalidVaultAddress` if the vault is not a
    /// 20-byte hex address.
    pub fn from_request(request: &SignRequest<'a>) -> Result<Self, SignerError> {
        let vault_address = request
            .vault_address
            .map(|vault| {
                vault
                    .parse::<Address>()
                    .map_err(|_| SignerError::InvalidVaultAddress(vault.to_string()))
            })
            .transpose()?;

        Ok(Self {
            action: request.action,
            nonce: request.nonce,
            vault_address,
            expires_after: request.expires_after,
        })
    }

    /// Calculate action_hash.
    ///
    /// ```text
    /// data = msgpack(action) || nonce.to_be_bytes(8)
    ///     || (0x00 | 0x01 || vault_address(20))
    ///     || [0x00 || expires_after.to_be_bytes(8)]
    /// action_hash = keccak256(data)
    /// ```
    ///
    /// # Errors
    /// Returns `SignerError::SerializationFailed` if msgpack serialization fails.
    pub fn action_hash(&self) -> Result<B256, SignerError> {
        let mut data = Vec::new();

        // Named (map) msgpack encoding; key order follows serialization order
        let action_bytes = rmp_serde::to_vec_named(self.action)
            .map_err(|e| SignerError::SerializationFailed(e.to_string()))?;
        data.extend_from_slice(&action_bytes);

        data.extend_from_slice(&self.nonce.to_be_bytes());

        // The 0x00 tag is present even without a vault
        match &self.vault_address {
            None => data.push(0x00),
            Some(addr) => {
                data.push(0x01);
                data.extend_from_slice(addr.as_slice());
            }
        }

        // Unlike the vault, no expiry means no bytes at all
        if let Some(expires) = self.expires_after {
            data.push(0x00);
            data.extend_from_slice(&expires.to_be_bytes());
        }

        Ok(keccak256(&data))
    }
}

// =============================================================================
// PhantomAgent and EIP-712 Signing
// =============================================================================

/// EIP-712 domain constants.
pub const EIP712_DOMAIN_NAME: &str = "Exchange";
pub const EIP712_DOMAIN_VERSION: &str = "1";
pub const EIP712_CHAIN_ID: u64 = 1337;
pub const EIP712_VERIFYING_CONTRACT: Address = Address::ZERO;

sol! {
    #[derive(Debug)]
    struct Agent {
        string source;
        bytes32 connectionId;
    }
}

/// Phantom Agent structure (EIP-712 signing target).
#[derive(Debug, Clone)]
pub struct PhantomAgent {
    /// "a" (mainnet) or "b" (testnet)
    pub source: String,
    /// action_hash result
    pub connection_id: B256,
}

impl PhantomAgent {
    pub fn new(action_hash: B256, is_mainnet: bool) -> Self {
        let source = if is_mainnet { "a" } else { "b" };
        Self {
            source: source.to_string(),
            connection_id: action_hash,
        }
    }

    /// Sign using EIP-712 with domain
    /// `{name: "Exchange", version: "1", chainId: 1337, verifyingContract: 0x0}`
    /// and primary type `Agent`.
    pub async fn sign<S: AlloySigner + Send + Sync>(
        &self,
        signer: &S,
    ) -> Result<PrimitiveSignature, alloy::signers::Error> {
        let domain = eip712_domain! {
            name: EIP712_DOMAIN_NAME,
            version: EIP712_DOMAIN_VERSION,
            chain_id: EIP712_CHAIN_ID,
            verifying_contract: EIP712_VERIFYING_CONTRACT,
        };

        let agent = Agent {
            source: self.source.clone(),
            connectionId: self.connection_id,
        };

        // keccak256(0x1901 || domain_separator || struct_hash)
        let signing_hash = agent.eip712_signing_hash(&domain);

        signer.sign_hash(&signing_hash).await
    }
}

// =============================================================================
// Signer
// =============================================================================

/// Signing errors.
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Invalid vault address: {0}")]
    InvalidVaultAddress(String),

    #[error("Signing failed: {0}")]
    SigningFailed(#[from] alloy::signers::Error),

    #[error("Action serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Signature provider failed: {0}")]
    Provider(String),
}

/// Local-key signer for L1 actions.
#[derive(Debug, Clone)]
pub struct Signer {
    key_manager: Arc<KeyManager>,
}

impl Signer {
    pub fn new(key_manager: Arc<KeyManager>) -> Self {
        Self { key_manager }
    }

    /// Sign an action for the given network.
    ///
    /// # Errors
    /// Returns `SignerError` if action serialization or ECDSA signing fails.
    pub async fn sign_action(
        &self,
        input: SigningInput<'_>,
        is_mainnet: bool,
    ) -> Result<PrimitiveSignature, SignerError> {
        let action_hash = input.action_hash()?;
        let phantom_agent = PhantomAgent::new(action_hash, is_mainnet);

        // Never log the signature or key material
        let signature = phantom_agent.sign(self.key_manager.signer()).await?;

        Ok(signature)
    }

    /// Address derived from the signing key.
    pub fn address(&self) -> Address {
        self.key_manager.address()
    }
}

impl SignatureProvider for Signer {
    fn sign<'a>(
        &'a self,
        request: SignRequest<'a>,
    ) -> BoxFuture<'a, Result<SignatureResult, SignerError>> {
        Box::pin(async move {
            let input = SigningInput::from_request(&request)?;
            debug!(
                kind = %request.action.kind(),
                nonce = request.nonce,
                vault = input.vault_address.is_some(),
                is_mainnet = request.is_mainnet,
                "Signing L1 action"
            );
            let signature = self.sign_action(input, request.is_mainnet).await?;
            Ok(SignatureResult::from(signature))
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
