//! Channel registry: maps channel names to their message logs.
//!
//! Channels are created lazily on first reference by any operation and are
//! never removed. Creation of the same name from many requests at once
//! yields exactly one log.

use super::channel_log::ChannelLog;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Concurrent name → log map shared by all request handlers.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: DashMap<String, Arc<ChannelLog>>,
}

impl ChannelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a channel, creating an empty one if it does not exist yet.
    ///
    /// Only the map shard is locked while creating; appends and waits on
    /// the returned log never hold registry locks.
    pub fn get_or_create(&self, name: &str) -> Arc<ChannelLog> {
        if let Some(log) = self.channels.get(name) {
            return Arc::clone(log.value());
        }

        let entry = self.channels.entry(name.to_owned()).or_insert_with(|| {
            debug!(channel = %name, "Creating channel");
            Arc::new(ChannelLog::new())
        });
        Arc::clone(entry.value())
    }

    /// Number of channels created so far
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}
