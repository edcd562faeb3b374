use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use secretbox::cli::{init_logging, write_salt_file};
use secretbox::config::default_salt_path;
use secretbox::crypto::{Salt, SaltOptions, MIN_SALT_LENGTH};

#[derive(Parser)]
#[command(
    name = "saltshaker",
    author = "Kaylee Beyene",
    version,
    about = "Generate a random salt for secretbox"
)]
struct Cli {
    /// Where to write the salt (defaults to ~/.config/secretbox/salt)
    #[arg(long)]
    dest: Option<PathBuf>,

    /// Number of characters to generate
    #[arg(long, default_value_t = MIN_SALT_LENGTH)]
    length: usize,

    /// Replace an existing salt file
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let dest = match cli.dest {
        Some(dest) => dest,
        None => default_salt_path()?,
    };

    let salt = Salt::random(&SaltOptions { length: cli.length })?;
    write_salt_file(&dest, &salt, cli.force)?;

    info!("Wrote {}-character salt to {}", cli.length, dest.display());
    println!("{}", dest.display());

    Ok(())
}
