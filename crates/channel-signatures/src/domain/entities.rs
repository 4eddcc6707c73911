//! # Domain Entities
//!
//! Channel identity, participant metadata and signed state bundles.

use super::errors::SignatureError;
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use std::fmt;

/// Length of a channel id in bytes.
pub const CHANNEL_ID_LEN: usize = 32;

/// 32-byte channel identifier, rendered as lowercase hex at the boundary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelId([u8; CHANNEL_ID_LEN]);

impl ChannelId {
    pub const fn new(bytes: [u8; CHANNEL_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from raw bytes; anything but exactly 32 bytes is rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        let arr: [u8; CHANNEL_ID_LEN] = bytes.try_into().map_err(|_| {
            SignatureError::InvalidArgument(format!(
                "channel id must be {} bytes, got {}",
                CHANNEL_ID_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Parse 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        Self::from_slice(&hex::decode(s)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; CHANNEL_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelId({})", self.to_hex())
    }
}

impl TryFrom<String> for ChannelId {
    type Error = SignatureError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<ChannelId> for String {
    fn from(id: ChannelId) -> Self {
        id.to_hex()
    }
}

/// One channel participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name
    pub name: String,
    /// Signing address, interpreted by the signing oracle
    pub address: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Participant metadata of a channel at one epoch.
///
/// `reinit` changes whenever the channel is closed and reopened, so
/// signatures from an earlier epoch cannot be replayed.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMetadata {
    /// Participants in channel order
    pub participants: Vec<Participant>,
    /// Opaque epoch token
    #[serde_as(as = "Base64")]
    pub reinit: Vec<u8>,
}

/// A payload together with the signatures collected over it.
///
/// Signatures appear in participant order but are not indexed by
/// participant; participants that could not sign are simply absent.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedData {
    /// Signed payload
    #[serde_as(as = "Base64")]
    pub data: Vec<u8>,
    /// Raw signatures
    #[serde_as(as = "Vec<Base64>")]
    pub signatures: Vec<Vec<u8>>,
}
