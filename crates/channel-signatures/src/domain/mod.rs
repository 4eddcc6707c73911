//! # Domain Layer
//!
//! Pure logic for channel state signing. No I/O.

pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod message;
