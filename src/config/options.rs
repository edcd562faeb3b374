//! Per-session cipher options

use super::settings::Settings;

/// Default suffix appended to locked files
pub const DEFAULT_SUFFIX: &str = ".enc";

/// Immutable options shared by every file operation of a cipher instance
#[derive(Clone)]
pub struct CipherOptions {
    salt: String,
    suffix: String,
    dry_run: bool,
    max_input_bytes: Option<usize>,
}

impl Default for CipherOptions {
    fn default() -> Self {
        Self {
            salt: String::new(),
            suffix: DEFAULT_SUFFIX.to_string(),
            dry_run: false,
            max_input_bytes: None,
        }
    }
}

impl CipherOptions {
    /// Options with the given salt and defaults for everything else
    pub fn new(salt: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            ..Default::default()
        }
    }

    /// Options seeded from persisted settings
    pub fn from_settings(salt: impl Into<String>, settings: &Settings) -> Self {
        Self {
            salt: salt.into(),
            suffix: settings.suffix.clone(),
            dry_run: false,
            max_input_bytes: settings.max_input_bytes,
        }
    }

    /// Use a different filename suffix
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Compute destinations without touching the filesystem
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Cap the size of files read into guarded memory
    #[must_use]
    pub fn with_max_input_bytes(mut self, max: Option<usize>) -> Self {
        self.max_input_bytes = max;
        self
    }

    /// The salt fed to key derivation
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Suffix appended to locked files
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether writes are skipped
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Cap on input size, if any
    pub fn max_input_bytes(&self) -> Option<usize> {
        self.max_input_bytes
    }
}

impl std::fmt::Debug for CipherOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherOptions")
            .field("suffix", &self.suffix)
            .field("dry_run", &self.dry_run)
            .field("max_input_bytes", &self.max_input_bytes)
            .finish_non_exhaustive()
    }
}
