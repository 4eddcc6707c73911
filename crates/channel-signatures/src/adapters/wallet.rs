//! # In-Memory Wallet
//!
//! Holds secp256k1 keys in process memory. Serves as the signing oracle for
//! tests and for embedders that manage their own keys.

use crate::domain::ecdsa;
use crate::ports::outbound::{OracleError, SignatureVerifier, SigningOracle};
use async_trait::async_trait;
use k256::ecdsa::SigningKey;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Key store keyed by address.
#[derive(Default)]
pub struct InMemoryWallet {
    keys: RwLock<HashMap<String, SigningKey>>,
}

impl InMemoryWallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh key and return its address.
    pub fn new_address(&self) -> String {
        self.import_key(SigningKey::random(&mut rand::thread_rng()))
    }

    /// Add an existing key and return its address.
    pub fn import_key(&self, key: SigningKey) -> String {
        let address = ecdsa::address_from_pubkey(key.verifying_key());
        debug!(address = %address, "Key added to wallet");
        self.keys.write().insert(address.clone(), key);
        address
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }
}

#[async_trait]
impl SigningOracle for InMemoryWallet {
    async fn validate_address(&self, address: &str) -> Result<bool, OracleError> {
        Ok(ecdsa::is_valid_address(address))
    }

    async fn is_mine(&self, address: &str) -> Result<bool, OracleError> {
        Ok(self.keys.read().contains_key(address))
    }

    async fn sign(&self, address: &str, message: &str) -> Result<Vec<u8>, OracleError> {
        let keys = self.keys.read();
        let key = keys
            .get(address)
            .ok_or_else(|| OracleError::UnknownAddress(address.to_string()))?;

        let sig = ecdsa::sign_message(key, message)
            .map_err(|e| OracleError::Signing(e.to_string()))?;
        Ok(sig.to_vec())
    }
}

#[async_trait]
impl SignatureVerifier for InMemoryWallet {
    async fn recover_signer(
        &self,
        message: &str,
        signature: &[u8],
    ) -> Result<Option<String>, OracleError> {
        Ok(ecdsa::recover_address(message, signature))
    }
}
