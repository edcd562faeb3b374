//! Logger setup for the binaries

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install a global stderr subscriber
///
/// Verbosity follows `RUST_LOG` (`trace`, `debug`, `info`, `warn`, `error`)
/// and defaults to `info`.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Unable to set global default subscriber");
    }
}
