//! # ECDSA Message Signatures (secp256k1)
//!
//! Personal-message signing and signer recovery for wallet-style addresses.
//!
//! - Address: `0x` + hex of the last 20 bytes of keccak256(uncompressed
//!   public key without the 0x04 prefix)
//! - Signed hash: keccak256 of the EIP-191 prefix plus the message
//! - Signature: 65 bytes, `r || s || v` with `v` in {27, 28}

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};

/// Length of a recoverable signature: r (32) || s (32) || v (1)
pub const SIGNATURE_LEN: usize = 65;

const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive the textual address of a public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> String {
    let pubkey_bytes = public_key.to_encoded_point(false);

    // Skip 0x04 prefix
    let hash = keccak256(&pubkey_bytes.as_bytes()[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

/// True if `address` has the shape produced by [`address_from_pubkey`].
pub fn is_valid_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .is_some_and(|h| h.len() == 40 && h.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')))
}

/// Hash that gets signed for a personal message.
pub fn personal_message_hash(message: &str) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX.as_bytes());
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message.as_bytes());
    hasher.finalize().into()
}

/// Sign a personal message.
pub fn sign_message(key: &SigningKey, message: &str) -> Result<[u8; SIGNATURE_LEN], k256::ecdsa::Error> {
    let hash = personal_message_hash(message);
    let (sig, recid) = key.sign_prehash_recoverable(&hash)?;

    let mut out = [0u8; SIGNATURE_LEN];
    out[..64].copy_from_slice(&sig.to_bytes());
    out[64] = 27 + recid.to_byte();
    Ok(out)
}

/// Recover the address that signed `message`.
///
/// Returns `None` for anything that is not a valid signature.
pub fn recover_address(message: &str, signature: &[u8]) -> Option<String> {
    if signature.len() != SIGNATURE_LEN {
        return None;
    }

    let v = match signature[64] {
        v @ (27 | 28) => v - 27,
        v @ (0 | 1) => v,
        _ => return None,
    };
    let recovery_id = RecoveryId::from_byte(v)?;
    let sig = Signature::from_slice(&signature[..64]).ok()?;

    let hash = personal_message_hash(message);
    let key = VerifyingKey::recover_from_prehash(&hash, &sig, recovery_id).ok()?;
    Some(address_from_pubkey(&key))
}
