//! L1 action signing for the Hyperliquid exchange endpoint.
//!
//! # Key Components
//!
//! - [`KeyManager`]: loads and owns the signing key
//! - [`SigningInput`]: computes the action hash (msgpack + nonce + vault + expiry)
//! - [`PhantomAgent`]: EIP-712 signing target wrapping the action hash
//! - [`Signer`]: production [`SignatureProvider`]
//! - [`MockSignatureProvider`]: recording provider for tests

pub mod key;
pub mod provider;
pub mod signer;

pub use alloy::primitives::Address;
pub use key::{KeyError, KeyManager, KeySource};
pub use provider::{
    BoxFuture, MockSignatureProvider, RecordedSignRequest, SignRequest, SignatureProvider,
    SignatureResult,
};
pub use signer::{PhantomAgent, Signer, SignerError, SigningInput};
