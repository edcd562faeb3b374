//! Salt generation and validation
//!
//! The cipher itself accepts any salt string; this module is the stricter
//! policy used by the salt tooling, which insists on at least
//! [`MIN_SALT_LENGTH`] characters.

use std::fmt;

use rand::distr::Alphanumeric;
use rand::Rng;

use crate::error::{SecretboxError, SecretboxResult};

/// Minimum accepted salt length, in characters
pub const MIN_SALT_LENGTH: usize = 16;

/// Options for random salt generation
#[derive(Debug, Clone)]
pub struct SaltOptions {
    /// Number of characters to generate
    pub length: usize,
}

impl Default for SaltOptions {
    fn default() -> Self {
        Self {
            length: MIN_SALT_LENGTH,
        }
    }
}

/// A validated salt string
#[derive(Clone, PartialEq, Eq)]
pub struct Salt {
    salt: String,
}

impl Salt {
    /// Generate a random alphanumeric salt
    pub fn random(opts: &SaltOptions) -> SecretboxResult<Self> {
        let salt: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(opts.length)
            .map(char::from)
            .collect();

        Self::from_string(salt)
    }

    /// Wrap an existing salt, rejecting it if it is too short
    pub fn from_string(salt: impl Into<String>) -> SecretboxResult<Self> {
        let salt = salt.into();
        validate_salt(&salt)?;
        Ok(Self { salt })
    }

    /// Get the salt as a string slice
    pub fn as_str(&self) -> &str {
        &self.salt
    }

    /// Get the salt bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.salt.as_bytes()
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.salt)
    }
}

// Salts are not secret, but keep them out of casual debug logs anyway
impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Salt").field("len", &self.salt.len()).finish()
    }
}

/// Check that `salt` is long enough to be used
pub fn validate_salt(salt: &str) -> SecretboxResult<()> {
    let len = salt.chars().count();
    if len < MIN_SALT_LENGTH {
        return Err(SecretboxError::Config(format!(
            "salt is too short: {} characters, need at least {}",
            len, MIN_SALT_LENGTH
        )));
    }
    Ok(())
}
