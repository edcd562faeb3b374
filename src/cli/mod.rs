//! Helpers shared by the command-line tools
//!
//! This module bridges clap argument parsing in the binaries with the
//! library: password input, logger setup, salt files and per-file
//! reporting.

pub mod logging;
pub mod password;
pub mod report;
pub mod salt;

use std::path::{Path, PathBuf};

use crate::error::{SecretboxError, SecretboxResult};

pub use logging::init_logging;
pub use password::{read_password, PASSWORD_ENV};
pub use report::report_outcomes;
pub use salt::write_salt_file;

/// Shortest salt the `secretbox` tool accepts
pub const CLI_MIN_SALT_LENGTH: usize = 8;

/// Reject salts the `secretbox` tool considers too weak to use
pub fn check_cli_salt(salt: &str) -> SecretboxResult<()> {
    if salt.chars().count() < CLI_MIN_SALT_LENGTH {
        return Err(SecretboxError::Config(format!(
            "invalid salt: must be at least {} characters",
            CLI_MIN_SALT_LENGTH
        )));
    }
    Ok(())
}

/// Resolve `path` against the current directory without touching the file
pub fn absolute_path(path: &Path) -> SecretboxResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| SecretboxError::Io(format!("Failed to read current directory: {}", e)))?;
    Ok(cwd.join(path))
}
