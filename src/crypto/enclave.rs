//! Encrypted-at-rest key storage
//!
//! A [`KeyEnclave`] keeps the secretbox key sealed with AES-256-GCM under a
//! random per-enclave sealing key held in guarded memory. The plaintext key
//! only exists inside a [`TransientKey`] returned by [`KeyEnclave::open`],
//! which wipes itself when dropped.

use std::fmt;

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    AeadCore, Aes256Gcm, Nonce,
};
use zeroize::Zeroize;

use crate::error::{SecretboxError, SecretboxResult};

use super::guarded::GuardedBuffer;
use super::key_derivation::DerivedKey;
use super::KEY_SIZE;

/// Size of the AES-GCM nonce in bytes (96 bits)
const SEAL_NONCE_SIZE: usize = 12;

/// Sealed storage for one 32-byte key
pub struct KeyEnclave {
    sealing_key: GuardedBuffer,
    nonce: [u8; SEAL_NONCE_SIZE],
    sealed: Vec<u8>,
}

impl KeyEnclave {
    /// Seal `key`, wiping the caller's copy afterwards
    pub fn seal(key: &mut [u8; KEY_SIZE]) -> SecretboxResult<Self> {
        let result = Self::seal_slice(key);
        key.zeroize();
        result
    }

    /// Seal a freshly derived key, wiping it afterwards
    pub fn from_derived(mut key: DerivedKey) -> SecretboxResult<Self> {
        Self::seal(key.as_bytes_mut())
    }

    /// Seal a key held in guarded memory; the buffer is released afterwards
    pub fn from_buffer(mut key: GuardedBuffer) -> SecretboxResult<Self> {
        let result = Self::seal_slice(key.bytes()?);
        key.release();
        result
    }

    fn seal_slice(key: &[u8]) -> SecretboxResult<Self> {
        if key.len() != KEY_SIZE {
            return Err(SecretboxError::KeyDerivation(format!(
                "Invalid key length: expected {}, got {}",
                KEY_SIZE,
                key.len()
            )));
        }

        let sealing_key = GuardedBuffer::random(KEY_SIZE);
        let cipher = Aes256Gcm::new_from_slice(sealing_key.bytes()?)
            .map_err(|e| SecretboxError::KeyDerivation(format!("Failed to create sealing cipher: {}", e)))?;

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = cipher
            .encrypt(&nonce, key)
            .map_err(|_| SecretboxError::KeyDerivation("Failed to seal key".to_string()))?;

        let mut nonce_bytes = [0u8; SEAL_NONCE_SIZE];
        nonce_bytes.copy_from_slice(nonce.as_slice());

        Ok(Self {
            sealing_key,
            nonce: nonce_bytes,
            sealed,
        })
    }

    /// Decrypt the key into a short-lived view
    ///
    /// The view must be dropped (or [`destroy`](TransientKey::destroy)ed)
    /// right after the single operation it was opened for. Opening does not
    /// change the sealed state and can be repeated.
    pub fn open(&self) -> SecretboxResult<TransientKey> {
        let cipher = Aes256Gcm::new_from_slice(self.sealing_key.bytes()?)
            .map_err(|e| SecretboxError::KeyDerivation(format!("Failed to create sealing cipher: {}", e)))?;

        let mut plain = cipher
            .decrypt(Nonce::from_slice(&self.nonce), self.sealed.as_slice())
            .map_err(|_| SecretboxError::Authentication)?;

        let buf = GuardedBuffer::from_bytes(&mut plain);
        plain.zeroize();

        Ok(TransientKey { buf })
    }

    /// Wipe the sealed storage; equivalent to dropping the enclave
    pub fn destroy(self) {}

    fn wipe(&mut self) {
        self.sealed.zeroize();
        self.nonce.zeroize();
        self.sealing_key.release();
    }

    /// Sealed bytes, for tests that need to tamper with them
    #[cfg(test)]
    pub(crate) fn sealed_mut(&mut self) -> &mut Vec<u8> {
        &mut self.sealed
    }
}

impl Drop for KeyEnclave {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl fmt::Debug for KeyEnclave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEnclave").finish_non_exhaustive()
    }
}

/// Plaintext key view valid for one cryptographic operation
pub struct TransientKey {
    buf: GuardedBuffer,
}

impl TransientKey {
    /// The 32 decrypted key bytes
    pub fn as_bytes(&self) -> SecretboxResult<&[u8]> {
        self.buf.bytes()
    }

    /// Wipe the view now rather than at end of scope
    pub fn destroy(mut self) {
        self.wipe();
    }

    fn wipe(&mut self) {
        self.buf.release();
    }
}

impl fmt::Debug for TransientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransientKey").finish_non_exhaustive()
    }
}
