//! XSalsa20-Poly1305 secretbox seal/open
//!
//! Provides authenticated encryption for file contents using the NaCl
//! secretbox construction. Every seal draws a fresh 24-byte nonce from the
//! OS random source; the envelope is `base64(nonce || sealed box)` where the
//! sealed box carries the 16-byte Poly1305 tag.

use base64::{engine::general_purpose::STANDARD, Engine};
use crypto_secretbox::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Nonce, XSalsa20Poly1305,
};

use crate::error::{SecretboxError, SecretboxResult};

use super::enclave::TransientKey;
use super::guarded::GuardedBuffer;

/// Size of the XSalsa20 nonce in bytes (192 bits)
pub const NONCE_SIZE: usize = 24;
/// Size of the Poly1305 authentication tag in bytes
pub const TAG_SIZE: usize = 16;

fn cipher_for(key: &TransientKey) -> SecretboxResult<XSalsa20Poly1305> {
    XSalsa20Poly1305::new_from_slice(key.as_bytes()?)
        .map_err(|e| SecretboxError::KeyDerivation(format!("Failed to create cipher: {}", e)))
}

/// Seal `plaintext` into a base64 envelope
///
/// Two calls with the same plaintext and key produce different envelopes
/// because the nonce differs.
pub fn seal(plaintext: &[u8], key: &TransientKey) -> SecretboxResult<String> {
    let cipher = cipher_for(key)?;

    // Generate random nonce
    let nonce = XSalsa20Poly1305::generate_nonce(&mut OsRng);

    let sealed = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| SecretboxError::Resource("plaintext too large to seal".to_string()))?;

    let mut envelope = Vec::with_capacity(NONCE_SIZE + sealed.len());
    envelope.extend_from_slice(nonce.as_slice());
    envelope.extend_from_slice(&sealed);

    Ok(STANDARD.encode(&envelope))
}

/// Open a base64 envelope
///
/// Line breaks (`\r`, `\n`) anywhere in the envelope are skipped, so files
/// that picked up a trailing newline in an editor still open.
///
/// Verification happens before any plaintext is released: on a bad tag the
/// result is [`SecretboxError::Authentication`] and nothing else.
pub fn open(envelope: &[u8], key: &TransientKey) -> SecretboxResult<GuardedBuffer> {
    let compact: Vec<u8> = envelope
        .iter()
        .copied()
        .filter(|b| !matches!(b, b'\r' | b'\n'))
        .collect();

    let decoded = STANDARD
        .decode(&compact)
        .map_err(|e| SecretboxError::Format(format!("Invalid envelope encoding: {}", e)))?;

    if decoded.len() < NONCE_SIZE + TAG_SIZE {
        return Err(SecretboxError::Format(format!(
            "Envelope too short: expected at least {} bytes, got {}",
            NONCE_SIZE + TAG_SIZE,
            decoded.len()
        )));
    }

    let (nonce, sealed) = decoded.split_at(NONCE_SIZE);
    let cipher = cipher_for(key)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| SecretboxError::Authentication)?;

    Ok(GuardedBuffer::from_vec(plaintext))
}
