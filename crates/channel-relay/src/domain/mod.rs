//! Domain types for the broadcast relay.
//!
//! Channel logs, the registry, configuration and error types. Nothing here
//! knows about HTTP.

pub mod channel_log;
pub mod config;
pub mod error;
pub mod registry;
pub mod types;

// Re-exports for convenience
pub use channel_log::ChannelLog;
pub use config::{ConfigError, RelayConfig, DEFAULT_PORT, DEFAULT_RECEIVE_TIMEOUT};
pub use error::{ApiError, ApiResult, RelayError};
pub use registry::ChannelRegistry;
pub use types::{ReceiveResult, Seq, SeqResponse};
