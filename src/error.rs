//! Custom error types for secretbox
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for secretbox operations
#[derive(Error, Debug)]
pub enum SecretboxError {
    /// File open/read/write errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Malformed base64 or envelope layout
    #[error("Format error: {0}")]
    Format(String),

    /// The key derivation primitive rejected its input or parameters
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Tag verification failed.
    ///
    /// Covers both corruption and a wrong password/salt; the two are not
    /// distinguished.
    #[error("Authentication failed: unable to open secretbox")]
    Authentication,

    /// Unlock target does not carry the configured suffix
    #[error("Unexpected suffix: {path} does not end with '{suffix}'")]
    SuffixMismatch { path: String, suffix: String },

    /// A guarded buffer was used after release
    #[error("Guarded buffer has already been released")]
    BufferLifecycle,

    /// Input exceeded the configured buffer cap
    #[error("Resource limit exceeded: {0}")]
    Resource(String),

    /// Collaborator configuration errors (salt sources, settings file)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SecretboxError {
    /// Create a suffix mismatch error for a path
    pub fn suffix_mismatch(path: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::SuffixMismatch {
            path: path.into(),
            suffix: suffix.into(),
        }
    }

    /// Check if this is an authentication failure
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Check if this is a suffix mismatch
    pub fn is_suffix_mismatch(&self) -> bool {
        matches!(self, Self::SuffixMismatch { .. })
    }
}

impl From<std::io::Error> for SecretboxError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for secretbox operations
pub type SecretboxResult<T> = Result<T, SecretboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SecretboxError::Config("missing salt".into());
        assert_eq!(err.to_string(), "Configuration error: missing salt");
    }

    #[test]
    fn test_suffix_mismatch_error() {
        let err = SecretboxError::suffix_mismatch("secret.txt", ".enc");
        assert_eq!(
            err.to_string(),
            "Unexpected suffix: secret.txt does not end with '.enc'"
        );
        assert!(err.is_suffix_mismatch());
        assert!(!err.is_authentication());
    }

    #[test]
    fn test_authentication_error_is_generic() {
        let err = SecretboxError::Authentication;
        let msg = err.to_string();
        assert!(!msg.contains("password"));
        assert!(!msg.contains("salt"));
        assert!(err.is_authentication());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SecretboxError = io_err.into();
        assert!(matches!(err, SecretboxError::Io(_)));
    }
}
