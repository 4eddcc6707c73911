//! Broadcast relay for game channels.
//!
//! Channel participants exchange real-time notifications (moves, disputes,
//! positions) through named, append-only channels. Every message sent to a
//! channel is delivered to every reader; readers long-poll instead of
//! busy-waiting.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 rpc-channel-server                        │
//! │                                                          │
//! │  POST /  ──► Tracing ─► BodyLimit ─► handle_json_rpc      │
//! │                                        │                 │
//! │                                   route_method           │
//! │                          send / getseq / receive         │
//! │                                        │                 │
//! │                               ChannelRegistry            │
//! │                     name ──► ChannelLog (Vec + Notify)    │
//! └──────────────────────────────────────────────────────────┘
//!            ▲
//!            │ JSON-RPC over HTTP
//!   RelayClient ◄── BroadcastChannel ◄── ReceiveLoop
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use channel_relay::{ChannelRegistry, RelayConfig, RelayServer};
//!
//! let server = RelayServer::new(RelayConfig::default(), Arc::new(ChannelRegistry::new()))?;
//! let running = server.bind().await?;
//! println!("listening on {}", running.local_addr());
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod client;
pub mod domain;
pub mod middleware;
pub mod router;
pub mod rpc;
pub mod service;

// Re-exports for public API
pub use client::{
    BroadcastChannel, ClientConfig, ClientError, MessageHandler, ReceiveLoop, RelayClient,
};
pub use domain::config::{RelayConfig, DEFAULT_PORT, DEFAULT_RECEIVE_TIMEOUT};
pub use domain::error::{ApiError, ApiResult, RelayError};
pub use domain::{ChannelLog, ChannelRegistry, ReceiveResult, Seq, SeqResponse};
pub use middleware::RelayMetrics;
pub use service::{RelayServer, RunningRelay};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
