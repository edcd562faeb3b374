//! Path management for secretbox
//!
//! ## Path Resolution Order
//!
//! 1. `SECRETBOX_CONFIG_DIR` environment variable (if set)
//! 2. `<home>/.config/secretbox`

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::SecretboxError;

/// Application directory name under `~/.config`
pub const APP_NAME: &str = "secretbox";

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "SECRETBOX_CONFIG_DIR";

/// Manages all paths used by secretbox
#[derive(Debug, Clone)]
pub struct SecretboxPaths {
    /// Base directory for all secretbox configuration
    base_dir: PathBuf,
}

impl SecretboxPaths {
    /// Create a new SecretboxPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SecretboxError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            default_config_dir_for_home(&home_dir()?)
        };

        Ok(Self { base_dir })
    }

    /// Create SecretboxPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/secretbox/ or override)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the salt file
    pub fn salt_file(&self) -> PathBuf {
        self.base_dir.join("salt")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SecretboxError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SecretboxError::Io(format!("Failed to create config directory: {}", e)))
    }
}

/// The current user's home directory
pub fn home_dir() -> Result<PathBuf, SecretboxError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| SecretboxError::Config("Could not determine home directory".into()))
}

fn default_config_dir_for_home(home: &Path) -> PathBuf {
    home.join(".config").join(APP_NAME)
}

/// Default salt location for a user: `<home>/.config/secretbox/salt`
pub fn default_salt_path_for_home(home: &Path) -> PathBuf {
    default_config_dir_for_home(home).join("salt")
}

/// Default salt location for the current user
pub fn default_salt_path() -> Result<PathBuf, SecretboxError> {
    Ok(default_salt_path_for_home(&home_dir()?))
}
