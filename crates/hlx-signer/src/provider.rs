//! Signature provider trait.
//!
//! Separates "who signs" from "how the request is shaped": the executor only
//! needs a `SignatureResult` for a given action, nonce and signing context.
//! This allows for:
//! - Dependency injection for testing
//! - Remote or hardware signers behind the same seam

use std::pin::Pin;

use alloy::primitives::PrimitiveSignature;
use hlx_core::Action;
use serde::{Deserialize, Serialize};

use crate::signer::SignerError;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Everything a provider needs to sign one action.
#[derive(Debug, Clone, Copy)]
pub struct SignRequest<'a> {
    pub action: &'a Action,
    /// `None` when trading for the signer's own account.
    pub vault_address: Option<&'a str>,
    /// Millisecond timestamp; the envelope must carry the same value.
    pub nonce: u64,
    pub expires_after: Option<u64>,
    pub is_mainnet: bool,
}

/// EIP-712 signature components as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureResult {
    /// r component (hex with 0x prefix).
    pub r: String,
    /// s component (hex with 0x prefix).
    pub s: String,
    /// v component (27 or 28).
    pub v: u8,
}

impl SignatureResult {
    /// Create from raw signature bytes (65 bytes: r(32) + s(32) + v(1)).
    ///
    /// Normalizes v from 0/1 to 27/28.
    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        let v_raw = bytes[64];
        let v = if v_raw < 27 { v_raw + 27 } else { v_raw };
        Self {
            r: format!("0x{}", hex::encode(&bytes[0..32])),
            s: format!("0x{}", hex::encode(&bytes[32..64])),
            v,
        }
    }
}

impl From<PrimitiveSignature> for SignatureResult {
    fn from(signature: PrimitiveSignature) -> Self {
        Self::from_bytes(&signature.as_bytes())
    }
}

/// Produces signatures for exchange actions.
pub trait SignatureProvider: Send + Sync {
    fn sign<'a>(
        &'a self,
        request: SignRequest<'a>,
    ) -> BoxFuture<'a, Result<SignatureResult, SignerError>>;
}

/// Owned copy of a [`SignRequest`] seen by [`MockSignatureProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSignRequest {
    pub action: Action,
    pub vault_address: Option<String>,
    pub nonce: u64,
    pub expires_after: Option<u64>,
    pub is_mainnet: bool,
}

/// Mock signature provider for testing.
#[derive(Debug)]
pub struct MockSignatureProvider {
    /// Recorded requests for verification.
    requests: parking_lot::Mutex<Vec<RecordedSignRequest>>,
    /// Failure message to return instead of a signature.
    failure: parking_lot::Mutex<Option<String>>,
    signature: SignatureResult,
}

impl Default for MockSignatureProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSignatureProvider {
    pub fn new() -> Self {
        let mut bytes = [0u8; 65];
        bytes[0..32].copy_from_slice(&[0xab; 32]);
        bytes[32..64].copy_from_slice(&[0xcd; 32]);
        Self {
            requests: parking_lot::Mutex::new(Vec::new()),
            failure: parking_lot::Mutex::new(None),
            signature: SignatureResult::from_bytes(&bytes),
        }
    }

    /// Make every subsequent call fail with `SignerError::Provider`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    /// The signature returned on success.
    pub fn signature(&self) -> &SignatureResult {
        &self.signature
    }

    pub fn get_requests(&self) -> Vec<RecordedSignRequest> {
        self.requests.lock().clone()
    }
}

impl SignatureProvider for MockSignatureProvider {
    fn sign<'a>(
        &'a self,
        request: SignRequest<'a>,
    ) -> BoxFuture<'a, Result<SignatureResult, SignerError>> {
        Box::pin(async move {
            self.requests.lock().push(RecordedSignRequest {
                action: request.action.clone(),
                vault_address: request.vault_address.map(str::to_string),
                nonce: request.nonce,
                expires_after: request.expires_after,
                is_mainnet: request.is_mainnet,
            });

            let failure = self.failure.lock().clone();
            match failure {
                Some(message) => Err(SignerError::Provider(message)),
                None => Ok(self.signature.clone()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_from_bytes() {
        let mut bytes = [0u8; 65];
        bytes[0..32].copy_from_slice(&[0xab; 32]);
        bytes[32..64].copy_from_slice(&[0xcd; 32]);
        bytes[64] = 28;

        let sig = SignatureResult::from_bytes(&bytes);
        assert_eq!(sig.r.len(), 66); // "0x" + 64 hex chars
        assert!(sig.r.starts_with("0x"));
        assert_eq!(sig.s.len(), 66);
        assert!(sig.s.starts_with("0x"));
        assert_eq!(sig.v, 28);
    }

    #[test]
    fn test_signature_from_bytes_normalizes_v() {
        let mut bytes = [0u8; 65];
        bytes[64] = 1;
        assert_eq!(SignatureResult::from_bytes(&bytes).v, 28);

        bytes[64] = 0;
        assert_eq!(SignatureResult::from_bytes(&bytes).v, 27);
    }

    #[test]
    fn test_signature_serialization() {
        let sig = SignatureResult {
            r: "0x01".to_string(),
            s: "0x02".to_string(),
            v: 27,
        };
        assert_eq!(
            serde_json::to_string(&sig).unwrap(),
            r#"{"r":"0x01","s":"0x02","v":27}"#
        );
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let provider = MockSignatureProvider::new();
        let action = Action::noop();

        let result = provider
            .sign(SignRequest {
                action: &action,
                vault_address: Some("0xabc"),
                nonce: 42,
                expires_after: None,
                is_mainnet: false,
            })
            .await;

        assert_eq!(result.unwrap(), *provider.signature());
        let requests = provider.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].nonce, 42);
        assert_eq!(requests[0].vault_address.as_deref(), Some("0xabc"));
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let provider = MockSignatureProvider::new();
        provider.fail_with("hsm offline");
        let action = Action::noop();

        let result = provider
            .sign(SignRequest {
                action: &action,
                vault_address: None,
                nonce: 1,
                expires_after: None,
                is_mainnet: true,
            })
            .await;

        assert!(matches!(result, Err(SignerError::Provider(msg)) if msg == "hsm offline"));
    }
}
