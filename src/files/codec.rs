//! Locking and unlocking files on disk
//!
//! `lock_file` writes `<name><suffix>` next to the original; `unlock_file`
//! requires the suffix and strips exactly that many bytes to get the
//! original name back. Under dry-run both compute and return the
//! destination but leave the filesystem untouched.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cipher::Secretbox;
use crate::error::{SecretboxError, SecretboxResult};

use super::file_io::{read_guarded, write_file};

/// Which direction a batch runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Lock,
    Unlock,
}

/// Result of processing one file in a batch
#[derive(Debug)]
pub struct FileOutcome {
    /// The file that was processed
    pub source: PathBuf,
    /// Destination path on success
    pub result: SecretboxResult<PathBuf>,
}

impl FileOutcome {
    /// Whether the file was processed without error
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn require_suffix(suffix: &str) -> SecretboxResult<()> {
    if suffix.is_empty() {
        return Err(SecretboxError::Config(
            "suffix must not be empty; locked files would overwrite their originals".to_string(),
        ));
    }
    Ok(())
}

/// Destination for locking `path`: the file name with `suffix` appended
pub fn locked_path(path: &Path, suffix: &str) -> SecretboxResult<PathBuf> {
    require_suffix(suffix)?;

    let name = path
        .file_name()
        .ok_or_else(|| SecretboxError::Io(format!("{} is not a file path", path.display())))?;

    let mut locked = OsString::from(name);
    locked.push(suffix);
    Ok(path.with_file_name(locked))
}

/// Destination for unlocking `path`: the file name minus exactly `suffix`
pub fn unlocked_path(path: &Path, suffix: &str) -> SecretboxResult<PathBuf> {
    require_suffix(suffix)?;

    let mismatch = || SecretboxError::suffix_mismatch(path.display().to_string(), suffix);

    let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(mismatch)?;
    let stem = name.strip_suffix(suffix).ok_or_else(mismatch)?;

    // Nothing left to name the output after
    if stem.is_empty() {
        return Err(mismatch());
    }

    Ok(path.with_file_name(stem))
}

/// Encrypt the file at `path` and write the envelope next to it
pub fn lock_file(path: &Path, cipher: &Secretbox) -> SecretboxResult<PathBuf> {
    let options = cipher.options();
    let out_path = locked_path(path, options.suffix())?;

    debug!("Reading {}", path.display());
    let buf = read_guarded(path, options.max_input_bytes())?;

    debug!("Sealing {} bytes", buf.len());
    let envelope = cipher.lock_buffer(&buf)?;
    buf.destroy();

    if options.is_dry_run() {
        info!(
            "Dry run is enabled so don't actually write {}",
            out_path.display()
        );
        return Ok(out_path);
    }

    write_file(&out_path, envelope.as_bytes())?;
    debug!("Wrote {}", out_path.display());

    Ok(out_path)
}

/// Decrypt the file at `path` and write the plaintext next to it
///
/// The suffix is checked before the file is opened.
pub fn unlock_file(path: &Path, cipher: &Secretbox) -> SecretboxResult<PathBuf> {
    let options = cipher.options();
    let out_path = unlocked_path(path, options.suffix())?;

    debug!("Reading {}", path.display());
    let envelope = read_guarded(path, options.max_input_bytes())?;

    debug!("Opening envelope");
    let plain = cipher.unlock(envelope.bytes()?)?;
    envelope.destroy();

    if options.is_dry_run() {
        info!(
            "Dry run is enabled so don't actually write {}",
            out_path.display()
        );
        return Ok(out_path);
    }

    write_file(&out_path, plain.bytes()?)?;
    debug!("Wrote {}", out_path.display());

    Ok(out_path)
}

/// Run `op` over every path; one failure never stops the rest
pub fn process_all<P: AsRef<Path>>(paths: &[P], cipher: &Secretbox, op: Operation) -> Vec<FileOutcome> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let result = match op {
                Operation::Lock => lock_file(path, cipher),
                Operation::Unlock => unlock_file(path, cipher),
            };
            FileOutcome {
                source: path.to_path_buf(),
                result,
            }
        })
        .collect()
}

/// Lock every path; see [`process_all`]
pub fn lock_all<P: AsRef<Path>>(paths: &[P], cipher: &Secretbox) -> Vec<FileOutcome> {
    process_all(paths, cipher, Operation::Lock)
}

/// Unlock every path; see [`process_all`]
pub fn unlock_all<P: AsRef<Path>>(paths: &[P], cipher: &Secretbox) -> Vec<FileOutcome> {
    process_all(paths, cipher, Operation::Unlock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CipherOptions;
    use crate::crypto::KEY_SIZE;
    use tempfile::TempDir;

    fn test_box(options: CipherOptions) -> Secretbox {
        let mut key = [0x11u8; KEY_SIZE];
        Secretbox::with_key(&mut key, options).unwrap()
    }

    fn dir_listing(dir: &Path) -> Vec<(String, Vec<u8>)> {
        let mut entries: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| {
                let e = e.unwrap();
                (
                    e.file_name().to_string_lossy().into_owned(),
                    std::fs::read(e.path()).unwrap(),
                )
            })
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn test_locked_path() {
        let path = locked_path(Path::new("/tmp/secret.txt"), ".enc").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/secret.txt.enc"));

        let relative = locked_path(Path::new("secret.txt"), ".enc").unwrap();
        assert_eq!(relative, PathBuf::from("secret.txt.enc"));
    }

    #[test]
    fn test_unlocked_path_strips_exact_suffix() {
        // A character-class trim would eat the trailing "e", "n", "c" too
        let path = unlocked_path(Path::new("/tmp/fence.enc"), ".enc").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/fence"));

        let path = unlocked_path(Path::new("notes.c.enc"), ".enc").unwrap();
        assert_eq!(path, PathBuf::from("notes.c"));
    }

    #[test]
    fn test_unlocked_path_multi_dot_suffix() {
        let path = unlocked_path(Path::new("archive.tar.sb.gz"), ".sb.gz").unwrap();
        assert_eq!(path, PathBuf::from("archive.tar"));
    }

    #[test]
    fn test_unlocked_path_mismatch() {
        let result = unlocked_path(Path::new("secret.txt"), ".enc");
        assert!(matches!(result, Err(SecretboxError::SuffixMismatch { .. })));
    }

    #[test]
    fn test_unlocked_path_bare_suffix() {
        let result = unlocked_path(Path::new("/tmp/.enc"), ".enc");
        assert!(matches!(result, Err(SecretboxError::SuffixMismatch { .. })));
    }

    #[test]
    fn test_empty_suffix_rejected() {
        assert!(matches!(
            locked_path(Path::new("a.txt"), ""),
            Err(SecretboxError::Config(_))
        ));
        assert!(matches!(
            unlocked_path(Path::new("a.txt"), ""),
            Err(SecretboxError::Config(_))
        ));
    }

    #[test]
    fn test_lock_then_unlock_file() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("secret.txt");
        std::fs::write(&plain_path, b"hello world").unwrap();

        let sb = test_box(CipherOptions::new("s4lty"));

        let locked = lock_file(&plain_path, &sb).unwrap();
        assert_eq!(locked, temp_dir.path().join("secret.txt.enc"));
        assert_ne!(std::fs::read(&locked).unwrap(), b"hello world");

        std::fs::remove_file(&plain_path).unwrap();

        let unlocked = unlock_file(&locked, &sb).unwrap();
        assert_eq!(unlocked, plain_path);
        assert_eq!(std::fs::read(&plain_path).unwrap(), b"hello world");
    }

    #[test]
    fn test_lock_overwrites_existing_destination() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("a.txt");
        let locked_path = temp_dir.path().join("a.txt.enc");
        std::fs::write(&plain_path, b"x").unwrap();
        std::fs::write(&locked_path, vec![b'z'; 4096]).unwrap();

        let sb = test_box(CipherOptions::new("s4lty"));
        lock_file(&plain_path, &sb).unwrap();

        let envelope = std::fs::read(&locked_path).unwrap();
        assert!(envelope.len() < 4096);
        assert!(sb.unlock(&envelope).is_ok());
    }

    #[test]
    fn test_unlock_wrong_suffix_does_not_read() {
        let temp_dir = TempDir::new().unwrap();
        // Does not exist: a read attempt would surface as an Io error
        let path = temp_dir.path().join("secret.txt");

        let sb = test_box(CipherOptions::new("s4lty"));
        let result = unlock_file(&path, &sb);
        assert!(matches!(result, Err(SecretboxError::SuffixMismatch { .. })));
    }

    #[test]
    fn test_unlock_tolerates_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("secret.txt");
        std::fs::write(&plain_path, b"hello world").unwrap();

        let sb = test_box(CipherOptions::new("s4lty"));
        let locked = lock_file(&plain_path, &sb).unwrap();
        std::fs::remove_file(&plain_path).unwrap();

        let mut text = std::fs::read(&locked).unwrap();
        text.push(b'\n');
        std::fs::write(&locked, &text).unwrap();

        unlock_file(&locked, &sb).unwrap();
        assert_eq!(std::fs::read(&plain_path).unwrap(), b"hello world");
    }

    #[test]
    fn test_unlock_corrupted_file() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("doc.txt");
        std::fs::write(&plain_path, b"hello world").unwrap();

        let sb = test_box(CipherOptions::new("s4lty"));
        let locked = lock_file(&plain_path, &sb).unwrap();
        std::fs::remove_file(&plain_path).unwrap();

        // Swap one base64 character for a different valid one
        let mut text = std::fs::read(&locked).unwrap();
        text[10] = if text[10] == b'A' { b'B' } else { b'A' };
        std::fs::write(&locked, &text).unwrap();

        let result = unlock_file(&locked, &sb);
        assert!(matches!(result, Err(SecretboxError::Authentication)));
        assert!(!plain_path.exists());
    }

    #[test]
    fn test_unlock_garbage_is_format_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("junk.enc");
        std::fs::write(&path, b"%%% not base64 %%%").unwrap();

        let sb = test_box(CipherOptions::new("s4lty"));
        let result = unlock_file(&path, &sb);
        assert!(matches!(result, Err(SecretboxError::Format(_))));
    }

    #[test]
    fn test_dry_run_lock_leaves_filesystem_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("secret.txt");
        std::fs::write(&plain_path, b"hello world").unwrap();
        let before = dir_listing(temp_dir.path());

        let sb = test_box(CipherOptions::new("s4lty").with_dry_run(true));
        let out = lock_file(&plain_path, &sb).unwrap();

        assert_eq!(out, temp_dir.path().join("secret.txt.enc"));
        assert!(!out.exists());
        assert_eq!(dir_listing(temp_dir.path()), before);
    }

    #[test]
    fn test_dry_run_unlock_leaves_filesystem_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("secret.txt");
        std::fs::write(&plain_path, b"hello world").unwrap();

        let sb = test_box(CipherOptions::new("s4lty"));
        let locked = lock_file(&plain_path, &sb).unwrap();
        std::fs::write(&plain_path, b"stale contents").unwrap();
        let before = dir_listing(temp_dir.path());

        let dry = test_box(CipherOptions::new("s4lty").with_dry_run(true));
        let out = unlock_file(&locked, &dry).unwrap();

        assert_eq!(out, plain_path);
        assert_eq!(dir_listing(temp_dir.path()), before);
    }

    #[test]
    fn test_custom_suffix() {
        let temp_dir = TempDir::new().unwrap();
        let plain_path = temp_dir.path().join("data.json");
        std::fs::write(&plain_path, b"{}").unwrap();

        let sb = test_box(CipherOptions::new("s4lty").with_suffix(".locked"));
        let locked = lock_file(&plain_path, &sb).unwrap();
        assert_eq!(locked, temp_dir.path().join("data.json.locked"));

        let unlocked = unlock_file(&locked, &sb).unwrap();
        assert_eq!(unlocked, plain_path);
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let temp_dir = TempDir::new().unwrap();
        let good_a = temp_dir.path().join("a.txt");
        let missing = temp_dir.path().join("missing.txt");
        let good_b = temp_dir.path().join("b.txt");
        std::fs::write(&good_a, b"a").unwrap();
        std::fs::write(&good_b, b"b").unwrap();

        let sb = test_box(CipherOptions::new("s4lty"));
        let outcomes = lock_all(&[&good_a, &missing, &good_b], &sb);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert!(matches!(outcomes[1].result, Err(SecretboxError::Io(_))));
        assert!(outcomes[2].is_ok());
        assert_eq!(outcomes[1].source, missing);
        assert!(temp_dir.path().join("b.txt.enc").exists());
    }

    #[test]
    fn test_unlock_all_reports_each_file() {
        let temp_dir = TempDir::new().unwrap();
        let plain = temp_dir.path().join("a.txt");
        std::fs::write(&plain, b"a").unwrap();

        let sb = test_box(CipherOptions::new("s4lty"));
        let locked = lock_file(&plain, &sb).unwrap();

        let outcomes = unlock_all(&[locked, plain.clone()], &sb);
        assert_eq!(outcomes[0].result.as_ref().unwrap(), &plain);
        assert!(matches!(
            outcomes[1].result,
            Err(SecretboxError::SuffixMismatch { .. })
        ));
    }
}
