//! secretbox - Password-based file encryption with guarded key memory
//!
//! This library locks and unlocks individual files with a key derived from a
//! password and salt, keeping plaintext key material out of ordinary memory
//! except for the duration of a single seal or open.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: Guarded memory, scrypt key derivation, the sealed key enclave
//!   and XSalsa20-Poly1305 envelopes
//! - `cipher`: The `Secretbox` instance tying a key to its options
//! - `files`: Locking/unlocking files, suffix handling and dry-run
//! - `config`: Options, paths, salt sources and persisted settings
//! - `cli`: Helpers shared by the command-line tools
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,no_run
//! use secretbox::{CipherOptions, Secretbox};
//!
//! let sb = Secretbox::new("s33kret", CipherOptions::new("s4lty"))?;
//! let locked = sb.lock_file("notes.txt")?;
//! let unlocked = sb.unlock_file(&locked)?;
//! # Ok::<(), secretbox::SecretboxError>(())
//! ```

pub mod cipher;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod files;

pub use cipher::Secretbox;
pub use config::CipherOptions;
pub use crypto::GuardedBuffer;
pub use error::{SecretboxError, SecretboxResult};
