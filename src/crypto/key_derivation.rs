//! Key derivation using scrypt
//!
//! Derives the 32-byte secretbox key from a password and salt with scrypt,
//! a memory-hard function that makes brute-force search expensive.
//!
//! The cost parameters are fixed for this version of the format: changing
//! them would make previously locked files undecryptable.

use scrypt::Params;
use zeroize::Zeroize;

use crate::error::{SecretboxError, SecretboxResult};

use super::KEY_SIZE;

/// log2 of the scrypt cost factor (N = 32768)
pub const SCRYPT_LOG_N: u8 = 15;
/// scrypt block size
pub const SCRYPT_R: u32 = 8;
/// scrypt parallelism
pub const SCRYPT_P: u32 = 1;

/// A derived encryption key
///
/// Short-lived: it is handed to a [`KeyEnclave`](super::KeyEnclave) for
/// sealing right after derivation.
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    /// Mutable access, used by the enclave to wipe the key after sealing
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8; KEY_SIZE] {
        &mut self.key
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Derive an encryption key from a password and salt
pub fn derive_key(password: &[u8], salt: &[u8]) -> SecretboxResult<DerivedKey> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_SIZE)
        .map_err(|e| SecretboxError::KeyDerivation(format!("Invalid scrypt parameters: {}", e)))?;

    let mut key = [0u8; KEY_SIZE];
    scrypt::scrypt(password, salt, &params, &mut key)
        .map_err(|e| SecretboxError::KeyDerivation(format!("scrypt failed: {}", e)))?;

    Ok(DerivedKey { key })
}
