//! The `Secretbox` cipher instance
//!
//! Binds one sealed key to one set of [`CipherOptions`]. Build it once per
//! "locked with this password" session and reuse it for every file.
//!
//! Each operation opens the enclave, uses the transient key for exactly one
//! seal or open, and wipes it before returning. An instance is `Sync`, but
//! callers sharing one across threads should still serialize their
//! operations so at most one transient key is alive at a time.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CipherOptions;
use crate::crypto::{self, derive_key, GuardedBuffer, KeyEnclave, KEY_SIZE};
use crate::error::SecretboxResult;
use crate::files;

/// A password-derived cipher bound to a set of options
#[derive(Debug)]
pub struct Secretbox {
    enclave: KeyEnclave,
    options: CipherOptions,
}

impl Secretbox {
    /// Derive the key from `password` and the salt in `options`
    pub fn new(password: &str, options: CipherOptions) -> SecretboxResult<Self> {
        let buf = GuardedBuffer::from_vec(password.as_bytes().to_vec());
        Self::with_buffer(buf, options)
    }

    /// Derive the key from a password already held in guarded memory
    ///
    /// The password buffer is released once the key is sealed.
    pub fn with_buffer(mut password: GuardedBuffer, options: CipherOptions) -> SecretboxResult<Self> {
        debug!("Deriving key");
        let key = derive_key(password.bytes()?, options.salt().as_bytes())?;
        password.release();

        let enclave = KeyEnclave::from_derived(key)?;
        Ok(Self::with_enclave(enclave, options))
    }

    /// Use raw key bytes directly, wiping the caller's copy
    pub fn with_key(key: &mut [u8; KEY_SIZE], options: CipherOptions) -> SecretboxResult<Self> {
        let enclave = KeyEnclave::seal(key)?;
        Ok(Self::with_enclave(enclave, options))
    }

    /// Wrap an existing enclave
    pub fn with_enclave(enclave: KeyEnclave, options: CipherOptions) -> Self {
        Self { enclave, options }
    }

    /// The options this instance was built with
    pub fn options(&self) -> &CipherOptions {
        &self.options
    }

    /// Seal `body` into a base64 envelope
    pub fn lock(&self, body: &[u8]) -> SecretboxResult<String> {
        let key = self.enclave.open()?;
        let envelope = crypto::seal(body, &key);
        key.destroy();
        envelope
    }

    /// Read `reader` into guarded memory and seal it
    pub fn lock_reader<R: Read>(&self, reader: R) -> SecretboxResult<String> {
        let buf = GuardedBuffer::from_reader(reader, self.options.max_input_bytes())?;
        self.lock_buffer(&buf)
    }

    /// Seal the contents of a guarded buffer
    pub fn lock_buffer(&self, buf: &GuardedBuffer) -> SecretboxResult<String> {
        self.lock(buf.bytes()?)
    }

    /// Open a base64 envelope into guarded memory
    pub fn unlock(&self, envelope: &[u8]) -> SecretboxResult<GuardedBuffer> {
        let key = self.enclave.open()?;
        let plain = crypto::open(envelope, &key);
        key.destroy();
        plain
    }

    /// Lock the file at `path`; see [`files::lock_file`]
    pub fn lock_file(&self, path: impl AsRef<Path>) -> SecretboxResult<PathBuf> {
        files::lock_file(path.as_ref(), self)
    }

    /// Unlock the file at `path`; see [`files::unlock_file`]
    pub fn unlock_file(&self, path: impl AsRef<Path>) -> SecretboxResult<PathBuf> {
        files::unlock_file(path.as_ref(), self)
    }
}
