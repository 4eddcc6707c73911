//! # Adapters Module
//!
//! Wallet implementations of the signing ports.

pub mod rpc_wallet;
pub mod wallet;

pub use rpc_wallet::{RpcWallet, RpcWalletConfig};
pub use wallet::InMemoryWallet;
