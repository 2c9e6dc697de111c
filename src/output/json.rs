//! JSON output formatting for focusflow.

use serde_json::json;

use crate::config::Config;
use crate::error::FocusError;
use crate::features::focus::SessionSnapshot;

/// Format settings as JSON, including the derived interval lengths in seconds.
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_settings_json(config: &Config) -> Result<String, FocusError> {
    let output = json!({
        "timer": config.timer,
        "notifications": config.notifications,
        "session": config.timer.session_config(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a timer snapshot as JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_snapshot_json(snapshot: &SessionSnapshot) -> Result<String, FocusError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
