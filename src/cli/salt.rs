//! Writing generated salts to disk

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::crypto::Salt;
use crate::error::{SecretboxError, SecretboxResult};

/// Write `salt` to `path`, creating parent directories
///
/// An existing file is only replaced when `force` is set: losing a salt
/// makes every file locked with it unrecoverable. On unix the file is
/// created readable by its owner only.
pub fn write_salt_file(path: &Path, salt: &Salt, force: bool) -> SecretboxResult<()> {
    if path.exists() && !force {
        return Err(SecretboxError::Config(format!(
            "{} already exists; refusing to overwrite without --force",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            SecretboxError::Io(format!("Failed to create directory {}: {}", parent.display(), e))
        })?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .map_err(|e| SecretboxError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

    file.write_all(salt.as_bytes())
        .map_err(|e| SecretboxError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(())
}
