//! Logging configuration using tracing.
//!
//! Logs go to stderr so stdout carries only transcripts and results.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding an explicit filter, e.g. `antrun=debug`.
pub const LOG_ENV: &str = "ANTRUN_LOG";

/// Initialize the logging system.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    // Ignore a second initialization (only possible in tests).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

/// Filter used when `ANTRUN_LOG` is unset.
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
