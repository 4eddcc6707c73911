//! JSON-RPC client for a relay server.

use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use super::types::{ClientConfig, ClientError, JsonRpcRequest, JsonRpcResponse};
use crate::domain::types::{ReceiveResult, Seq, SeqResponse};

/// Relay client.
pub struct RelayClient {
    client: Client,
    url: String,
    request_id: AtomicU64,
}

impl RelayClient {
    /// Create a new relay client.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            client,
            url: config.url,
            request_id: AtomicU64::new(1),
        })
    }

    /// Relay endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_connect() {
            ClientError::Connection(format!("Cannot connect to {}", self.url))
        } else {
            ClientError::Http(e)
        }
    }

    /// Call a JSON-RPC method and wait for its result.
    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, ClientError> {
        let request = JsonRpcRequest::new(method, params, self.next_id());

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let rpc_response: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(error.into());
        }

        rpc_response
            .result
            .ok_or_else(|| ClientError::Parse("Missing result in response".to_string()))
    }

    /// Send a JSON-RPC notification; the server sends no response object.
    async fn notify<P: Serialize>(&self, method: &str, params: P) -> Result<(), ClientError> {
        let request = JsonRpcRequest::notification(method, params);

        self.client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?
            .error_for_status()?;
        Ok(())
    }

    /// Append a message to a channel (fire-and-forget).
    pub async fn send(&self, channel: &str, message: &serde_json::Value) -> Result<(), ClientError> {
        trace!(channel, "Sending message");
        self.notify("send", (channel, message)).await
    }

    /// Current sequence number of a channel.
    pub async fn get_seq(&self, channel: &str) -> Result<Seq, ClientError> {
        let resp: SeqResponse = self.call("getseq", (channel,)).await?;
        Ok(resp.seq)
    }

    /// Long-poll for messages after `from_seq`.
    pub async fn receive(&self, channel: &str, from_seq: Seq) -> Result<ReceiveResult, ClientError> {
        self.call("receive", (channel, from_seq)).await
    }
}
