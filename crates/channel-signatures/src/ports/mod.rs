//! # Ports Layer
//!
//! Trait seams between the signing logic and the wallet that holds keys.

pub mod outbound;

pub use outbound::{OracleError, SignatureVerifier, SigningOracle};
