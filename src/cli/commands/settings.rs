//! Settings command implementation.

use tracing::info;

use crate::cli::args::{OutputFormat, SetArgs, SettingsCommands};
use crate::config::{Config, Paths};
use crate::error::FocusError;
use crate::output::format_settings;

/// Execute a settings subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written, or a
/// requested duration is out of range.
pub fn settings(
    paths: &Paths,
    cmd: &SettingsCommands,
    format: OutputFormat,
) -> Result<String, FocusError> {
    match cmd {
        SettingsCommands::Show => {
            let config = Config::load_from_path(&paths.config_file)?;
            format_settings(&config, format)
        }
        SettingsCommands::Set(args) => set(paths, args, format),
        SettingsCommands::Reset => {
            let config = Config::default();
            save(paths, &config)?;
            info!("settings restored to defaults");
            saved(&config, format, "Timer settings reset to defaults")
        }
    }
}

fn set(paths: &Paths, args: &SetArgs, format: OutputFormat) -> Result<String, FocusError> {
    if args.is_empty() {
        return Err(FocusError::Config(
            "Nothing to change. Pass --work, --break, --[no-]sound or --[no-]notifications"
                .to_string(),
        ));
    }

    let mut config = Config::load_from_path(&paths.config_file)?;
    config.timer = config.timer.with_overrides(args.work, args.break_minutes)?;
    if let Some(sound) = args.sound() {
        config.notifications.sound = sound;
    }
    if let Some(enabled) = args.notifications() {
        config.notifications.enabled = enabled;
    }

    save(paths, &config)?;
    info!(
        work_minutes = config.timer.work_minutes,
        break_minutes = config.timer.break_minutes,
        "settings saved"
    );
    saved(&config, format, "Timer settings saved")
}

fn save(paths: &Paths, config: &Config) -> Result<(), FocusError> {
    paths.ensure_dirs()?;
    config.save_to_path(&paths.config_file)
}

fn saved(config: &Config, format: OutputFormat, message: &str) -> Result<String, FocusError> {
    let body = format_settings(config, format)?;
    Ok(match format {
        OutputFormat::Json => body,
        OutputFormat::Pretty => format!("{message}\n\n{body}"),
    })
}
