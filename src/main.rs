use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use secretbox::cli::{absolute_path, check_cli_salt, init_logging, read_password, report_outcomes};
use secretbox::config::{CipherOptions, SaltSource, SecretboxPaths, Settings};
use secretbox::crypto::tracker::install_interrupt_hook;
use secretbox::files::{process_all, Operation};
use secretbox::Secretbox;

#[derive(Parser)]
#[command(
    name = "secretbox",
    author = "Kaylee Beyene",
    version,
    about = "Lock and unlock files with a password-derived key",
    long_about = "secretbox encrypts files with XSalsa20-Poly1305 using a key derived \
                  from your password and a salt with scrypt. Locked files are written \
                  next to the originals with a suffix appended."
)]
struct Cli {
    /// Files to lock (or unlock with --unlock)
    files: Vec<PathBuf>,

    /// Decrypt files instead of encrypting them
    #[arg(long)]
    unlock: bool,

    /// Suffix marking locked files (defaults to the configured one, ".enc")
    #[arg(long)]
    suffix: Option<String>,

    /// Dry run: report destinations without writing anything
    #[arg(long)]
    debug: bool,

    /// Salt source: "config:", "config:<path>", "env:" or the salt itself
    #[arg(long)]
    salt: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();
    install_interrupt_hook()?;

    if cli.files.is_empty() {
        info!("No secrets to tell!");
        return Ok(());
    }

    let files = cli
        .files
        .iter()
        .map(|path| absolute_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    let paths = SecretboxPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let salt_arg = cli.salt.unwrap_or_else(|| settings.salt_source.clone());
    let salt = salt_arg.parse::<SaltSource>()?.resolve()?;
    check_cli_salt(&salt)?;

    let mut options = CipherOptions::from_settings(salt, &settings).with_dry_run(cli.debug);
    if let Some(suffix) = cli.suffix {
        options = options.with_suffix(suffix);
    }

    let password = read_password(!cli.unlock)?;
    let sb = Secretbox::with_buffer(password, options)?;

    let op = if cli.unlock {
        Operation::Unlock
    } else {
        Operation::Lock
    };

    let outcomes = process_all(&files, &sb, op);
    let failures = report_outcomes(&outcomes, &mut std::io::stdout().lock())?;

    if failures > 0 {
        bail!("{} of {} file(s) failed", failures, outcomes.len());
    }

    Ok(())
}
