//! File-level locking and unlocking
//!
//! This module provides the on-disk side of secretbox:
//! - Reading files into guarded memory and writing results
//! - Suffix conventions for locked files
//! - Dry-run and per-file batch outcomes

pub mod codec;
pub mod file_io;

pub use codec::{
    lock_all, lock_file, locked_path, process_all, unlock_all, unlock_file, unlocked_path,
    FileOutcome, Operation,
};
pub use file_io::{read_guarded, write_file};
