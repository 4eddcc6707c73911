//! Broadcast JSON-RPC methods: `send`, `getseq` and `receive`.

use crate::domain::error::ApiResult;
use crate::domain::registry::ChannelRegistry;
use crate::domain::types::{ReceiveResult, Seq, SeqResponse};
use crate::middleware::RelayMetrics;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Broadcast RPC methods handler
pub struct BroadcastRpc {
    registry: Arc<ChannelRegistry>,
    receive_timeout: Duration,
    metrics: Arc<RelayMetrics>,
}

impl BroadcastRpc {
    pub fn new(
        registry: Arc<ChannelRegistry>,
        receive_timeout: Duration,
        metrics: Arc<RelayMetrics>,
    ) -> Self {
        Self {
            registry,
            receive_timeout,
            metrics,
        }
    }

    /// send - Appends a message to the channel's log
    ///
    /// The message is stored as-is and delivered to every reader.
    #[instrument(skip(self, message))]
    pub async fn send(&self, channel: &str, message: serde_json::Value) -> ApiResult<()> {
        let seq = self.registry.get_or_create(channel).append(message);
        self.metrics.record_message_sent();
        debug!(seq, "Message appended");
        Ok(())
    }

    /// getseq - Returns the number of messages in the channel
    #[instrument(skip(self))]
    pub async fn get_seq(&self, channel: &str) -> ApiResult<SeqResponse> {
        let seq = self.registry.get_or_create(channel).current_seq();
        Ok(SeqResponse { seq })
    }

    /// receive - Long-polls for messages after `from_seq`
    ///
    /// Blocks this request only, for at most the configured receive timeout.
    #[instrument(skip(self))]
    pub async fn receive(&self, channel: &str, from_seq: Seq) -> ApiResult<ReceiveResult> {
        let log = self.registry.get_or_create(channel);
        let result = log.receive_since(from_seq, self.receive_timeout).await;

        if result.is_empty() {
            self.metrics.record_empty_receive();
        }
        debug!(count = result.messages.len(), seq = result.seq, "Receive done");
        Ok(result)
    }

    /// Number of channels known to the relay
    pub fn channel_count(&self) -> usize {
        self.registry.channel_count()
    }
}
