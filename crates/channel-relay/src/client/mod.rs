//! Client side of the relay: JSON-RPC calls and per-channel receive loops.

mod broadcast;
mod relay;
mod types;

pub use broadcast::{BroadcastChannel, MessageHandler, ReceiveLoop};
pub use relay::RelayClient;
pub use types::{ClientConfig, ClientError, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
