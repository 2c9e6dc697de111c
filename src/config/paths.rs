//! Path resolution for focusflow configuration and data files.
//!
//! All focusflow data is stored in `~/.focusflow/` unless overridden:
//! - `config.yaml` - timer and notification settings
//! - `focusflow.log` - log output while the full-screen timer is open

use std::path::PathBuf;

use crate::error::FocusError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "FOCUSFLOW_HOME";

/// Paths to focusflow configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.focusflow/`
    pub root: PathBuf,
    /// Config file: `~/.focusflow/config.yaml`
    pub config_file: PathBuf,
    /// Log file: `~/.focusflow/focusflow.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on `FOCUSFLOW_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FocusError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            FocusError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".focusflow")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            log_file: root.join("focusflow.log"),
            root,
        }
    }

    /// Resolve from an explicit directory if given, otherwise the default.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is given and the home directory
    /// cannot be determined.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, FocusError> {
        root.map_or_else(Self::new, |r| Ok(Self::with_root(r)))
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FocusError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                FocusError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
