//! RPC method handlers for the relay's JSON-RPC API.

pub mod broadcast;

pub use broadcast::BroadcastRpc;
