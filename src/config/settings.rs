//! User settings for secretbox
//!
//! Optional defaults for the command-line tools, persisted as
//! `config.json` next to the salt file.

use serde::{Deserialize, Serialize};

use super::options::DEFAULT_SUFFIX;
use super::paths::SecretboxPaths;
use crate::error::SecretboxError;

/// User settings for secretbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Suffix appended to locked files
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Where the salt comes from (`config:`, `config:<path>`, `env:` or a literal)
    #[serde(default = "default_salt_source")]
    pub salt_source: String,

    /// Upper bound on the size of a file read into guarded memory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_input_bytes: Option<usize>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_salt_source() -> String {
    "config:".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            suffix: default_suffix(),
            salt_source: default_salt_source(),
            max_input_bytes: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &SecretboxPaths) -> Result<Self, SecretboxError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SecretboxError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| SecretboxError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SecretboxPaths) -> Result<(), SecretboxError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SecretboxError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SecretboxError::Io(format!("Failed to write settings file: {}", e)))
    }
}
