//! # JSON-RPC Wallet
//!
//! Signing oracle backed by an external wallet daemon that speaks the
//! `validateaddress` / `getaddressinfo` / `signmessage` / `verifymessage`
//! JSON-RPC methods. Signatures travel base64-encoded.

use crate::ports::outbound::{OracleError, SignatureVerifier, SigningOracle};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Connection settings for the wallet daemon.
#[derive(Debug, Clone)]
pub struct RpcWalletConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl RpcWalletConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

#[derive(Serialize)]
struct WalletRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct WalletResponse<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<WalletError>,
}

#[derive(Deserialize)]
struct WalletError {
    code: i32,
    message: String,
}

#[derive(Deserialize)]
struct ValidateAddressResult {
    isvalid: bool,
}

#[derive(Deserialize)]
struct AddressInfoResult {
    ismine: bool,
}

#[derive(Deserialize)]
struct VerifyMessageResult {
    valid: bool,
    #[serde(default)]
    address: Option<String>,
}

/// Wallet daemon client.
pub struct RpcWallet {
    client: Client,
    config: RpcWalletConfig,
    request_id: AtomicU64,
}

impl RpcWallet {
    pub fn new(config: RpcWalletConfig) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            config,
            request_id: AtomicU64::new(1),
        })
    }

    async fn call<P: Serialize + Send, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, OracleError> {
        let request = WalletRequest {
            jsonrpc: "2.0",
            id: self.request_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let mut builder = self.client.post(&self.config.url).json(&request);
        if let Some(user) = &self.config.username {
            builder = builder.basic_auth(user, self.config.password.as_ref());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        let body: WalletResponse<R> = response
            .json()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(OracleError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        body.result
            .ok_or_else(|| OracleError::InvalidResponse(format!("{method}: missing result")))
    }
}

#[async_trait]
impl SigningOracle for RpcWallet {
    async fn validate_address(&self, address: &str) -> Result<bool, OracleError> {
        let res: ValidateAddressResult = self.call("validateaddress", (address,)).await?;
        Ok(res.isvalid)
    }

    async fn is_mine(&self, address: &str) -> Result<bool, OracleError> {
        let res: AddressInfoResult = self.call("getaddressinfo", (address,)).await?;
        Ok(res.ismine)
    }

    async fn sign(&self, address: &str, message: &str) -> Result<Vec<u8>, OracleError> {
        let encoded: String = self.call("signmessage", (address, message)).await?;
        decode_signature(&encoded)
    }
}

#[async_trait]
impl SignatureVerifier for RpcWallet {
    async fn recover_signer(
        &self,
        message: &str,
        signature: &[u8],
    ) -> Result<Option<String>, OracleError> {
        // Empty address asks the wallet to recover the signer
        let res: VerifyMessageResult = self
            .call("verifymessage", ("", message, BASE64.encode(signature)))
            .await?;
        Ok(signer_of(res))
    }
}

fn decode_signature(encoded: &str) -> Result<Vec<u8>, OracleError> {
    BASE64
        .decode(encoded)
        .map_err(|e| OracleError::InvalidResponse(format!("signature is not base64: {e}")))
}

fn signer_of(res: VerifyMessageResult) -> Option<String> {
    if res.valid {
        res.address
    } else {
        None
    }
}
