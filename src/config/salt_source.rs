//! Resolving where the salt comes from
//!
//! A salt specification is one of:
//!
//! - `env:` reads `SECRETBOX_SALT`
//! - `config:` reads the default salt file for the current user
//! - `config:<path>` reads the salt file at `<path>`
//! - anything else is the salt itself

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{SecretboxError, SecretboxResult};

use super::paths::default_salt_path;

/// Environment variable consulted by `env:`
pub const SALT_ENV: &str = "SECRETBOX_SALT";

/// A parsed salt specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaltSource {
    /// Read from [`SALT_ENV`]
    Env,
    /// Read from a file; `None` means the default salt path
    File(Option<PathBuf>),
    /// Use the given string verbatim
    Literal(String),
}

impl FromStr for SaltSource {
    type Err = SecretboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SecretboxError::Config("missing salt".to_string()));
        }
        if s == "env:" {
            return Ok(Self::Env);
        }
        if let Some(path) = s.strip_prefix("config:") {
            if path.is_empty() {
                return Ok(Self::File(None));
            }
            return Ok(Self::File(Some(PathBuf::from(path))));
        }
        Ok(Self::Literal(s.to_string()))
    }
}

impl SaltSource {
    /// Produce the salt string
    pub fn resolve(&self) -> SecretboxResult<String> {
        match self {
            Self::Env => std::env::var(SALT_ENV)
                .map_err(|_| SecretboxError::Config(format!("{} is not set", SALT_ENV))),
            Self::File(Some(path)) => read_salt_file(path),
            Self::File(None) => read_salt_file(&default_salt_path()?),
            Self::Literal(salt) => Ok(salt.clone()),
        }
    }
}

/// Read a salt file as-is (no trimming: the bytes are the salt)
pub fn read_salt_file(path: &Path) -> SecretboxResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        SecretboxError::Config(format!("Failed to read salt file {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_env() {
        assert_eq!("env:".parse::<SaltSource>().unwrap(), SaltSource::Env);
    }

    #[test]
    fn test_parse_config_default() {
        assert_eq!(
            "config:".parse::<SaltSource>().unwrap(),
            SaltSource::File(None)
        );
    }

    #[test]
    fn test_parse_config_path() {
        assert_eq!(
            "config:/tmp/salt".parse::<SaltSource>().unwrap(),
            SaltSource::File(Some(PathBuf::from("/tmp/salt")))
        );
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(
            "s4lty".parse::<SaltSource>().unwrap(),
            SaltSource::Literal("s4lty".to_string())
        );
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!("".parse::<SaltSource>().is_err());
    }

    #[test]
    fn test_resolve_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("salt");
        std::fs::write(&path, "0123456789abcdef").unwrap();

        let salt = SaltSource::File(Some(path)).resolve().unwrap();
        assert_eq!(salt, "0123456789abcdef");
    }

    #[test]
    fn test_resolve_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = SaltSource::File(Some(temp_dir.path().join("nope"))).resolve();
        assert!(matches!(result, Err(SecretboxError::Config(_))));
    }

    #[test]
    fn test_resolve_literal() {
        let salt = SaltSource::Literal("s4lty".to_string()).resolve().unwrap();
        assert_eq!(salt, "s4lty");
    }
}
