//! Per-channel view of a relay: sequence tracking, payload encoding and a
//! background receive loop.
//!
//! Payloads are arbitrary bytes. They travel base64-encoded so they survive
//! the JSON transport unchanged.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::relay::RelayClient;
use super::types::ClientError;
use crate::domain::types::Seq;

/// Delay before retrying after a failed receive.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Consumer of messages arriving on a channel.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_message(&self, message: Vec<u8>);
}

/// One channel on a relay server.
///
/// Clones share the client and the last seen sequence number.
#[derive(Clone)]
pub struct BroadcastChannel {
    client: Arc<RelayClient>,
    channel: String,
    seq: Arc<AtomicU64>,
}

impl BroadcastChannel {
    /// Bind to `channel` on the relay behind `client`, starting at sequence 0.
    pub fn new(client: Arc<RelayClient>, channel: impl Into<String>) -> Self {
        Self {
            client,
            channel: channel.into(),
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Last sequence number seen from the server.
    pub fn seq(&self) -> Seq {
        self.seq.load(Ordering::Acquire)
    }

    fn update_seq(&self, seq: Seq) {
        self.seq.store(seq, Ordering::Release);
        debug!(channel = %self.channel, seq, "New sequence number");
    }

    /// Skip everything already in the channel.
    pub async fn initialise_sequence(&self) -> Result<(), ClientError> {
        info!(channel = %self.channel, "Querying relay for initial sequence number");
        let seq = self.client.get_seq(&self.channel).await?;
        self.update_seq(seq);
        Ok(())
    }

    /// Broadcast a payload to all participants.
    pub async fn send_message(&self, payload: &[u8]) -> Result<(), ClientError> {
        let encoded = serde_json::Value::String(BASE64.encode(payload));
        self.client.send(&self.channel, &encoded).await
    }

    /// Long-poll for new payloads since the last seen sequence number.
    ///
    /// Entries that are not base64 strings are dropped with a warning.
    pub async fn get_messages(&self) -> Result<Vec<Vec<u8>>, ClientError> {
        let res = self.client.receive(&self.channel, self.seq()).await?;
        self.update_seq(res.seq);

        let mut messages = Vec::with_capacity(res.messages.len());
        for m in res.messages {
            let Some(encoded) = m.as_str() else {
                warn!(channel = %self.channel, message = %m, "Non-string broadcast message");
                continue;
            };
            match BASE64.decode(encoded) {
                Ok(decoded) => messages.push(decoded),
                Err(_) => {
                    warn!(channel = %self.channel, message = %m, "Invalid base64 detected in broadcast message");
                }
            }
        }

        Ok(messages)
    }

    /// Initialise the sequence number and start feeding new messages to
    /// `handler` from a background task.
    pub async fn start(&self, handler: Arc<dyn MessageHandler>) -> Result<ReceiveLoop, ClientError> {
        self.initialise_sequence().await?;

        let (stop_tx, stop_rx) = watch::channel(false);
        let channel = self.clone();
        info!(channel = %self.channel, "Starting receive loop");
        let task = tokio::spawn(run_loop(channel, handler, stop_rx));

        Ok(ReceiveLoop { stop_tx, task })
    }
}

/// Handle to a running receive loop.
pub struct ReceiveLoop {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReceiveLoop {
    /// Stop the loop and wait for it to finish.
    pub async fn stop(self) {
        info!("Stopping receive loop");
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "Receive loop task failed");
        }
    }
}

async fn run_loop(
    channel: BroadcastChannel,
    handler: Arc<dyn MessageHandler>,
    mut stop_rx: watch::Receiver<bool>,
) {
    loop {
        let result = tokio::select! {
            _ = stop_rx.changed() => break,
            result = channel.get_messages() => result,
        };

        match result {
            Ok(messages) => {
                if !messages.is_empty() {
                    debug!(channel = %channel.channel, count = messages.len(), "Received messages");
                }
                for msg in messages {
                    handler.handle_message(msg).await;
                }
            }
            Err(e) => {
                warn!(channel = %channel.channel, error = %e, "Receive failed, retrying");
                tokio::select! {
                    _ = stop_rx.changed() => break,
                    _ = tokio::time::sleep(RETRY_BACKOFF) => {}
                }
            }
        }
    }
    debug!(channel = %channel.channel, "Receive loop finished");
}
