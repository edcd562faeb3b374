//! File I/O for guarded contents
//!
//! Reads go straight into guarded memory. Writes create or truncate the
//! destination in place; there is no temp-file-and-rename step.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::crypto::GuardedBuffer;
use crate::error::{SecretboxError, SecretboxResult};

/// Read a whole file into a guarded buffer
pub fn read_guarded(path: &Path, limit: Option<usize>) -> SecretboxResult<GuardedBuffer> {
    let file = File::open(path)
        .map_err(|e| SecretboxError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    GuardedBuffer::from_reader(file, limit).map_err(|e| match e {
        SecretboxError::Io(msg) => SecretboxError::Io(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Write `bytes` to `path`, creating it if absent and truncating it if present
pub fn write_file(path: &Path, bytes: &[u8]) -> SecretboxResult<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| SecretboxError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

    file.write_all(bytes)
        .map_err(|e| SecretboxError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    file.flush()
        .map_err(|e| SecretboxError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;

    Ok(())
}
