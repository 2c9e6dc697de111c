//! Output formatting for focusflow.
//!
//! This module provides formatters for displaying settings and timer state in
//! various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::FocusError;

pub use json::*;
pub use pretty::*;

/// Format settings based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_settings(config: &Config, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(config)),
        OutputFormat::Json => format_settings_json(config),
    }
}
