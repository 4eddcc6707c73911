//! # Channel Signatures
//!
//! Authenticated multi-party state signing for game channels.
//!
//! Every participant of a channel signs the same canonical text message
//! binding the game, the channel, its reinitialisation epoch, a topic and a
//! hash of the state. Signatures are produced by whichever wallet holds the
//! participant keys and verified by recovering the signer address.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): message construction, ECDSA helpers, entities
//! - **Ports Layer** (`ports/`): signing oracle and verifier traits
//! - **Adapters** (`adapters/`): in-memory and JSON-RPC wallets
//! - **Service Layer** (`service.rs`): signature collection and verification

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryWallet, RpcWallet, RpcWalletConfig};
pub use domain::ecdsa::{address_from_pubkey, is_valid_address, recover_address, sign_message};
pub use domain::entities::{ChannelId, ChannelMetadata, Participant, SignedData, CHANNEL_ID_LEN};
pub use domain::errors::SignatureError;
pub use domain::message::{build_message, MESSAGE_HEADER};
pub use ports::{OracleError, SignatureVerifier, SigningOracle};
pub use service::{verify_participant_signatures, SignatureCollector};
