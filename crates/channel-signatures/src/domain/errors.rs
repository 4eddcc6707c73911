//! # Signing Errors
//!
//! Error types for message building and signature collection.

use crate::ports::outbound::OracleError;
use thiserror::Error;

/// Errors that can occur while building, collecting or verifying signatures.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// A precondition was violated by the caller (e.g. a channel id that is
    /// not 32 bytes, or a newline in a topic)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The signing oracle failed; collection was aborted
    #[error("Signing oracle failed: {0}")]
    Oracle(#[from] OracleError),

    /// Malformed hex at a serialization boundary
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
