//! # Signed Message Codec
//!
//! Builds the canonical text that participants sign for a piece of channel
//! state. Every field sits on its own labelled line, and the payload enters
//! only through its SHA-256 hash, so the message stays small and fields
//! cannot bleed into each other.
//!
//! ```text
//! Game-Channel Signature
//! Game ID: <game id>
//! Channel: <channel id, 64 hex chars>
//! Reinit: <base64 of reinit>
//! Topic: <topic>
//! Data Hash: <sha256(data), 64 hex chars>
//! ```

use super::entities::ChannelId;
use super::errors::SignatureError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

/// First line of every signed message.
pub const MESSAGE_HEADER: &str = "Game-Channel Signature";

/// Build the message to sign for `data` under `topic`.
///
/// `channel_id` must be exactly 32 bytes. `game_id` and `topic` must not
/// contain line breaks or NUL.
pub fn build_message(
    game_id: &str,
    channel_id: &[u8],
    reinit: &[u8],
    topic: &str,
    data: &[u8],
) -> Result<String, SignatureError> {
    let channel_id = ChannelId::from_slice(channel_id)?;
    check_single_line("game id", game_id)?;
    check_single_line("topic", topic)?;

    Ok([
        MESSAGE_HEADER.to_string(),
        format!("Game ID: {game_id}"),
        format!("Channel: {}", channel_id.to_hex()),
        format!("Reinit: {}", BASE64.encode(reinit)),
        format!("Topic: {topic}"),
        format!("Data Hash: {}", data_hash(data)),
    ]
    .join("\n"))
}

/// Hex-encoded SHA-256 of a payload.
pub fn data_hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn check_single_line(field: &str, value: &str) -> Result<(), SignatureError> {
    if value.contains(['\n', '\r', '\0']) {
        return Err(SignatureError::InvalidArgument(format!(
            "{field} must not contain line breaks or NUL"
        )));
    }
    Ok(())
}
