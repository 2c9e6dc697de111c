use chrono::Duration;
use colored::Colorize;

use crate::config::Config;
use crate::features::focus::{
    format_duration, render_progress_bar, Mode, SessionConfig, SessionSnapshot,
};

fn on_off(value: bool) -> String {
    if value {
        "on".green().to_string()
    } else {
        "off".dimmed().to_string()
    }
}

/// Format settings as a labelled block
pub fn format_settings_pretty(config: &Config) -> String {
    let mut output = Vec::new();
    output.push("Timer Settings".bold().to_string());
    output.push("─".repeat(40));
    output.push(format!(
        "Work:          {}",
        format_duration(Duration::minutes(i64::from(config.timer.work_minutes)))
    ));
    output.push(format!(
        "Break:         {}",
        format_duration(Duration::minutes(i64::from(config.timer.break_minutes)))
    ));
    output.push(format!("Notifications: {}", on_off(config.notifications.enabled)));
    output.push(format!("Sound:         {}", on_off(config.notifications.sound)));
    output.join("\n")
}

/// One-line timer status for line-mode output
///
/// Progress is measured against the full configured length of the current
/// mode.
#[allow(clippy::cast_precision_loss)]
pub fn format_status_line(snapshot: &SessionSnapshot, config: SessionConfig) -> String {
    let full = config.duration_for(snapshot.mode);
    let progress = if full == 0 {
        1.0
    } else {
        f64::from(full.saturating_sub(snapshot.remaining_seconds)) / f64::from(full)
    };

    let icon = if snapshot.running { "▶" } else { "⏸" };
    let clock = snapshot.format_remaining();
    let clock = match snapshot.mode {
        Mode::Work => clock.cyan().bold(),
        Mode::Break => clock.green().bold(),
    };

    format!(
        "{icon} {} {clock} {} Session {}",
        snapshot.mode.display_name(),
        render_progress_bar(progress, 20),
        snapshot.session_number()
    )
}
