//! # Outbound Ports (Driven Ports / SPI)
//!
//! The wallet capabilities this crate depends on. Implemented by an
//! external wallet over JSON-RPC or by an in-memory key store.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Error from a signing oracle or signature verifier.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The oracle could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// The oracle answered with an error
    #[error("RPC error {code}: {message}")]
    Rpc { code: i32, message: String },

    /// The oracle's answer had an unexpected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Asked to sign with an address the oracle holds no key for
    #[error("Unknown address: {0}")]
    UnknownAddress(String),

    /// Producing the signature failed
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Capability to decide which addresses can sign and to sign with them.
#[async_trait]
pub trait SigningOracle: Send + Sync {
    /// Whether `address` is a well-formed address for this chain.
    async fn validate_address(&self, address: &str) -> Result<bool, OracleError>;

    /// Whether the key for `address` is locally controlled.
    async fn is_mine(&self, address: &str) -> Result<bool, OracleError>;

    /// Sign `message` with the key of `address`, returning raw signature bytes.
    async fn sign(&self, address: &str, message: &str) -> Result<Vec<u8>, OracleError>;
}

/// Capability to recover who signed a message.
#[async_trait]
pub trait SignatureVerifier: Send + Sync {
    /// Address that produced `signature` over `message`, or `None` if the
    /// signature is invalid.
    async fn recover_signer(
        &self,
        message: &str,
        signature: &[u8],
    ) -> Result<Option<String>, OracleError>;
}

#[async_trait]
impl<T: SigningOracle + ?Sized> SigningOracle for Arc<T> {
    async fn validate_address(&self, address: &str) -> Result<bool, OracleError> {
        (**self).validate_address(address).await
    }

    async fn is_mine(&self, address: &str) -> Result<bool, OracleError> {
        (**self).is_mine(address).await
    }

    async fn sign(&self, address: &str, message: &str) -> Result<Vec<u8>, OracleError> {
        (**self).sign(address, message).await
    }
}

#[async_trait]
impl<T: SignatureVerifier + ?Sized> SignatureVerifier for Arc<T> {
    async fn recover_signer(
        &self,
        message: &str,
        signature: &[u8],
    ) -> Result<Option<String>, OracleError> {
        (**self).recover_signer(message, signature).await
    }
}
