//! Cryptographic primitives for secretbox
//!
//! scrypt key derivation, an AES-256-GCM sealed key enclave, guarded memory
//! and XSalsa20-Poly1305 secretbox envelopes.

pub mod enclave;
pub mod encryption;
pub mod guarded;
pub mod key_derivation;
pub mod salt;
pub mod tracker;

/// Size of the secretbox key in bytes
pub const KEY_SIZE: usize = 32;

pub use enclave::{KeyEnclave, TransientKey};
pub use encryption::{open, seal, NONCE_SIZE, TAG_SIZE};
pub use guarded::GuardedBuffer;
pub use key_derivation::{derive_key, DerivedKey};
pub use salt::{validate_salt, Salt, SaltOptions, MIN_SALT_LENGTH};
