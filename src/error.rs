//! Error types for focusflow.

use thiserror::Error;

/// Errors raised outside the session core.
///
/// The scheduler itself never fails; everything that touches the
/// filesystem, the terminal, or user input reports through this type.
#[derive(Debug, Error)]
pub enum FocusError {
    /// Configuration could not be located, read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configured value is outside its allowed range.
    #[error("{message}")]
    InvalidSetting {
        /// Name of the offending setting.
        field: &'static str,
        /// User-facing explanation.
        message: String,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal setup, drawing, or event polling failed.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl FocusError {
    /// Build an [`FocusError::InvalidSetting`].
    pub fn invalid_setting(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FocusError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
