//! Configuration module for secretbox
//!
//! This module provides configuration management including:
//! - Cipher options shared by a locking session
//! - Config/salt path resolution
//! - Salt source resolution (`env:`, `config:`, literal)
//! - Persisted user settings

pub mod options;
pub mod paths;
pub mod salt_source;
pub mod settings;

pub use options::{CipherOptions, DEFAULT_SUFFIX};
pub use paths::{default_salt_path, default_salt_path_for_home, SecretboxPaths};
pub use salt_source::SaltSource;
pub use settings::Settings;
