use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::features::focus::parse_whole_minutes;

#[derive(Parser)]
#[command(name = "focusflow")]
#[command(about = "A focus session timer: alternating work and break intervals")]
#[command(long_about = "focusflow - A focus session timer for the terminal

Runs a work/break interval cycle with a live countdown and an alert each
time an interval ends. Completed work intervals are counted; the next
interval starts only when you say so.

QUICK START:
  focusflow timer                   Open the full-screen timer
  focusflow timer --work 50         One-off 50-minute work intervals
  focusflow settings set --break 10 Save a 10-minute break length

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  focusflow <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Directory holding config.yaml and the log file
    ///
    /// Defaults to ~/.focusflow
    #[arg(long, global = true, env = "FOCUSFLOW_HOME", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the work/break timer
    ///
    /// Opens a full-screen countdown. The timer starts idle at the
    /// beginning of a work interval.
    ///
    /// # Keys
    ///
    ///   space, enter   Start or pause
    ///   r              Reset the current interval
    ///   s              Switch between work and break
    ///   ?              Show key help
    ///   q, esc         Quit
    ///
    /// # Examples
    ///
    ///   focusflow timer                 Use saved durations
    ///   focusflow timer --work 50m      Override work length for this run
    ///   focusflow timer --plain         Line mode, commands read from stdin
    #[command(alias = "t")]
    Timer(TimerArgs),

    /// View or change saved timer settings
    ///
    /// # Subcommands
    ///
    ///   show    Show current settings
    ///   set     Change durations or alerts
    ///   reset   Restore defaults (25/5 minutes)
    ///
    /// # Examples
    ///
    ///   focusflow settings show
    ///   focusflow settings set --work 45 --break 15
    ///   focusflow settings set --no-sound
    Settings(SettingsArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   source <(focusflow completions bash)
    ///   focusflow completions zsh > ~/.zsh/completions/_focusflow
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the timer command.
#[derive(Args, Debug, Default)]
pub struct TimerArgs {
    /// Work interval length for this run (e.g. 25, 25m, 1h)
    ///
    /// Must be a whole number of minutes between 1 and 120.
    #[arg(short, long, value_parser = parse_whole_minutes, value_name = "DURATION")]
    pub work: Option<u32>,

    /// Break interval length for this run (e.g. 5, 5m)
    ///
    /// Must be a whole number of minutes between 1 and 60.
    #[arg(short = 'b', long = "break", value_parser = parse_whole_minutes, value_name = "DURATION")]
    pub break_minutes: Option<u32>,

    /// Line mode instead of the full-screen UI
    ///
    /// Reads one command per line from stdin: empty line or 't' to
    /// start/pause, 'r' to reset, 's' to switch mode, 'q' to quit.
    #[arg(long)]
    pub plain: bool,
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

/// Settings subcommands.
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Change one or more settings
    ///
    /// Durations are validated before anything is written: work must be
    /// 1-120 minutes and break 1-60 minutes.
    Set(SetArgs),

    /// Restore default settings
    Reset,
}

/// Arguments for `settings set`.
#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// Work interval length (e.g. 25, 25m, 1h)
    #[arg(short, long, value_parser = parse_whole_minutes, value_name = "DURATION")]
    pub work: Option<u32>,

    /// Break interval length (e.g. 5, 5m)
    #[arg(short = 'b', long = "break", value_parser = parse_whole_minutes, value_name = "DURATION")]
    pub break_minutes: Option<u32>,

    /// Ring the terminal bell when an interval ends
    #[arg(long, conflicts_with = "no_sound")]
    pub sound: bool,

    /// Do not ring the bell
    #[arg(long)]
    pub no_sound: bool,

    /// Show a message when an interval ends
    #[arg(long, conflicts_with = "no_notifications")]
    pub notifications: bool,

    /// Do not show completion messages
    #[arg(long)]
    pub no_notifications: bool,
}

impl SetArgs {
    /// Requested sound setting, if either flag was given.
    #[must_use]
    pub const fn sound(&self) -> Option<bool> {
        flag_pair(self.sound, self.no_sound)
    }

    /// Requested notification setting, if either flag was given.
    #[must_use]
    pub const fn notifications(&self) -> Option<bool> {
        flag_pair(self.notifications, self.no_notifications)
    }

    /// Whether any change was requested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.work.is_none()
            && self.break_minutes.is_none()
            && self.sound().is_none()
            && self.notifications().is_none()
    }
}

const fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
