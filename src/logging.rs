//! Logging configuration and initialization.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

use crate::error::FocusError;

/// Map a `-v` count to a default filter directive.
#[must_use]
pub const fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn env_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)))
}

/// Initialize tracing to stderr.
pub fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 3)
        .with_line_number(verbose >= 3)
        .init();

    debug!("focusflow started with verbosity level: {verbose}");
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}

/// Initialize tracing to an append-only log file.
///
/// Used while the full-screen timer owns the terminal.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_file_logging(verbose: u8, path: &Path) -> Result<(), FocusError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FocusError::Config(format!("Failed to open log file {}: {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(verbose >= 2)
        .init();

    debug!("focusflow started with verbosity level: {verbose}");
    Ok(())
}
