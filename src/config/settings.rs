//! Configuration settings for focusflow.
//!
//! Settings are loaded from `~/.focusflow/config.yaml`. Only interval
//! lengths and notification preferences persist; a running countdown never
//! does.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::FocusError;
use crate::features::focus::SessionConfig;

/// Allowed work interval length, in minutes.
pub const WORK_MINUTES_RANGE: RangeInclusive<u32> = 1..=120;
/// Allowed break interval length, in minutes.
pub const BREAK_MINUTES_RANGE: RangeInclusive<u32> = 1..=60;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Interval lengths.
    pub timer: TimerSettings,
    /// Completion alerts.
    pub notifications: NotificationConfig,
}

/// Interval lengths in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    /// Work interval length in minutes.
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    /// Break interval length in minutes.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

/// Completion alert settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Show a message when an interval ends.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell with the message.
    #[serde(default = "default_true")]
    pub sound: bool,
}

// Default value functions for serde
const fn default_work_minutes() -> u32 {
    25
}

const fn default_break_minutes() -> u32 {
    5
}

const fn default_true() -> bool {
    true
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            sound: default_true(),
        }
    }
}

impl TimerSettings {
    /// Check both lengths against their allowed ranges.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::InvalidSetting` naming the first bad value.
    pub fn validate(&self) -> Result<(), FocusError> {
        if !WORK_MINUTES_RANGE.contains(&self.work_minutes) {
            return Err(FocusError::invalid_setting(
                "work_minutes",
                format!(
                    "Work duration must be between {} and {} minutes",
                    WORK_MINUTES_RANGE.start(),
                    WORK_MINUTES_RANGE.end()
                ),
            ));
        }

        if !BREAK_MINUTES_RANGE.contains(&self.break_minutes) {
            return Err(FocusError::invalid_setting(
                "break_minutes",
                format!(
                    "Break duration must be between {} and {} minutes",
                    BREAK_MINUTES_RANGE.start(),
                    BREAK_MINUTES_RANGE.end()
                ),
            ));
        }

        Ok(())
    }

    /// Return a copy with the given overrides applied and validated.
    ///
    /// # Errors
    ///
    /// Returns `FocusError::InvalidSetting` if an override is out of range.
    pub fn with_overrides(
        self,
        work_minutes: Option<u32>,
        break_minutes: Option<u32>,
    ) -> Result<Self, FocusError> {
        let updated = Self {
            work_minutes: work_minutes.unwrap_or(self.work_minutes),
            break_minutes: break_minutes.unwrap_or(self.break_minutes),
        };
        updated.validate()?;
        Ok(updated)
    }

    /// Interval lengths in seconds, as the scheduler consumes them.
    #[must_use]
    pub const fn session_config(&self) -> SessionConfig {
        SessionConfig::from_minutes(self.work_minutes, self.break_minutes)
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or
    /// holds out-of-range durations.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, FocusError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FocusError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            FocusError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.timer.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), FocusError> {
        self.timer.validate()?;

        let contents = serde_yaml::to_string(self)
            .map_err(|e| FocusError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            FocusError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.timer.work_minutes, 25);
        assert_eq!(config.timer.break_minutes, 5);
        assert!(config.notifications.enabled);
        assert!(config.notifications.sound);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.timer.work_minutes = 50;
        config.timer.break_minutes = 10;
        config.notifications.sound = false;

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
timer:
  work_minutes: 45
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.work_minutes, 45);
        assert_eq!(config.timer.break_minutes, 5);
        assert!(config.notifications.enabled);
    }

    #[test]
    fn test_load_rejects_out_of_range() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer:\n  break_minutes: 0\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Break duration must be between 1 and 60 minutes"
        );
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(FocusError::Config(_))
        ));
    }

    #[test]
    fn test_save_rejects_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.timer.work_minutes = 121;

        assert!(config.save_to_path(&config_path).is_err());
        assert!(!config_path.exists());
    }

    #[test]
    fn test_validate_bounds() {
        let ok = TimerSettings {
            work_minutes: 120,
            break_minutes: 60,
        };
        assert!(ok.validate().is_ok());

        let low = TimerSettings {
            work_minutes: 0,
            break_minutes: 5,
        };
        assert_eq!(
            low.validate().unwrap_err().to_string(),
            "Work duration must be between 1 and 120 minutes"
        );
    }

    #[test]
    fn test_with_overrides() {
        let base = TimerSettings::default();
        let updated = base.with_overrides(Some(10), None).unwrap();
        assert_eq!(updated.work_minutes, 10);
        assert_eq!(updated.break_minutes, 5);

        assert!(base.with_overrides(None, Some(61)).is_err());
    }

    #[test]
    fn test_session_config_in_seconds() {
        let settings = TimerSettings::default();
        assert_eq!(settings.session_config(), SessionConfig::new(1500, 300));
    }
}
