//! Wire types of the relay RPC surface.
//!
//! Messages are opaque JSON values; the relay never inspects them.

use serde::{Deserialize, Serialize};

/// Sequence number of a channel: the number of messages stored in it.
pub type Seq = u64;

/// Result of `getseq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeqResponse {
    pub seq: Seq,
}

/// Result of `receive`: all messages after the requested sequence number
/// and the channel's sequence number at the time of the read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReceiveResult {
    pub messages: Vec<serde_json::Value>,
    pub seq: Seq,
}

impl ReceiveResult {
    /// Builds the result for `messages[from_seq..]`. A `from_seq` past the
    /// end yields no messages.
    pub fn from_log(messages: &[serde_json::Value], from_seq: Seq) -> Self {
        let start = usize::try_from(from_seq).unwrap_or(usize::MAX);
        Self {
            messages: messages.get(start..).map(<[_]>::to_vec).unwrap_or_default(),
            seq: messages.len() as Seq,
        }
    }

    /// True if no new messages arrived (e.g. the long-poll timed out).
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
