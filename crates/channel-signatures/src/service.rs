//! # Signature Collection Service
//!
//! Application service that signs channel state for every participant the
//! local wallet controls, and the matching verification routine.

use crate::domain::entities::{ChannelId, ChannelMetadata, SignedData};
use crate::domain::errors::SignatureError;
use crate::domain::message::build_message;
use crate::ports::outbound::{SignatureVerifier, SigningOracle};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, instrument};

/// Collects signatures over channel state through a signing oracle.
pub struct SignatureCollector<O: SigningOracle> {
    oracle: O,
    game_id: String,
}

impl<O: SigningOracle> SignatureCollector<O> {
    /// Create a collector for the given game.
    pub fn new(oracle: O, game_id: impl Into<String>) -> Self {
        Self {
            oracle,
            game_id: game_id.into(),
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// Sign `data` under `topic` with every participant key the oracle
    /// controls.
    ///
    /// Participants with an invalid or foreign address are skipped, so the
    /// result may hold anywhere from zero to all signatures, in participant
    /// order. The first oracle error aborts the whole collection.
    #[instrument(skip(self, meta, data), fields(channel = %channel_id))]
    pub async fn create_for_channel(
        &self,
        channel_id: &ChannelId,
        meta: &ChannelMetadata,
        topic: &str,
        data: &[u8],
    ) -> Result<SignedData, SignatureError> {
        let msg = build_message(
            &self.game_id,
            channel_id.as_bytes(),
            &meta.reinit,
            topic,
            data,
        )?;

        let mut signatures = Vec::new();
        for (index, p) in meta.participants.iter().enumerate() {
            if !self.oracle.validate_address(&p.address).await? {
                debug!(participant = index, address = %p.address, "Skipping invalid address");
                continue;
            }
            if !self.oracle.is_mine(&p.address).await? {
                debug!(participant = index, address = %p.address, "Skipping foreign address");
                continue;
            }

            signatures.push(self.oracle.sign(&p.address, &msg).await?);
            debug!(participant = index, name = %p.name, "Signed");
        }

        debug!(count = signatures.len(), "Collected signatures");
        Ok(SignedData {
            data: data.to_vec(),
            signatures,
        })
    }
}

/// Indices of the participants that signed `signed` under `topic`.
///
/// Each signature is mapped back to its signer by recovery; invalid
/// signatures and signers that are not participants are ignored.
pub async fn verify_participant_signatures<V: SignatureVerifier + ?Sized>(
    verifier: &V,
    game_id: &str,
    channel_id: &ChannelId,
    meta: &ChannelMetadata,
    topic: &str,
    signed: &SignedData,
) -> Result<BTreeSet<usize>, SignatureError> {
    let msg = build_message(
        game_id,
        channel_id.as_bytes(),
        &meta.reinit,
        topic,
        &signed.data,
    )?;

    let mut signers = HashSet::new();
    for sgn in &signed.signatures {
        if let Some(address) = verifier.recover_signer(&msg, sgn).await? {
            signers.insert(address);
        }
    }

    Ok(meta
        .participants
        .iter()
        .enumerate()
        .filter(|(_, p)| signers.contains(&p.address))
        .map(|(i, _)| i)
        .collect())
}
