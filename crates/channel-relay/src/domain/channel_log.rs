//! Append-only message log of a single broadcast channel.
//!
//! The sequence number of a channel is the number of messages in its log.
//! It starts at zero, and the n-th appended message moves it to n. Messages
//! are never removed, so any number of readers can replay the same range.
//!
//! Readers that are up to date block in [`ChannelLog::receive_since`] until
//! either a new message is appended or the timeout elapses. Waiters register
//! with the [`Notify`] while the message lock is held, so an append can never
//! slip in between the check and the wait.

use super::types::{ReceiveResult, Seq};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::trace;

/// Message history of one channel.
#[derive(Debug, Default)]
pub struct ChannelLog {
    messages: Mutex<Vec<serde_json::Value>>,
    appended: Notify,
}

impl ChannelLog {
    /// Create an empty log (sequence number 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and wake every pending reader.
    ///
    /// Returns the new sequence number.
    pub fn append(&self, message: serde_json::Value) -> Seq {
        let seq = {
            let mut messages = self.messages.lock();
            messages.push(message);
            messages.len() as Seq
        };
        self.appended.notify_waiters();
        seq
    }

    /// Number of messages currently stored.
    pub fn current_seq(&self) -> Seq {
        self.messages.lock().len() as Seq
    }

    /// Messages after `from_seq`, waiting up to `timeout` if there are none yet.
    ///
    /// Returns immediately if the log is already past `from_seq`. Otherwise
    /// waits once for an append or the timeout and then returns whatever is
    /// present, which is empty on timeout. A `from_seq` beyond the current
    /// sequence number is not an error.
    pub async fn receive_since(&self, from_seq: Seq, timeout: Duration) -> ReceiveResult {
        let notified = self.appended.notified();
        tokio::pin!(notified);

        {
            let messages = self.messages.lock();
            if messages.len() as Seq > from_seq {
                return ReceiveResult::from_log(&messages, from_seq);
            }
            notified.as_mut().enable();
        }

        if tokio::time::timeout(timeout, notified).await.is_err() {
            trace!(from_seq, "Receive timed out without new messages");
        }

        let messages = self.messages.lock();
        ReceiveResult::from_log(&messages, from_seq)
    }
}
