//! Formatting and parsing helpers for timer values.

use chrono::Duration;

/// Format whole seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so a two hour interval reads `120:00`.
#[must_use]
pub fn format_seconds_mmss(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, plural(seconds));
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{m} minute{}", plural(m)),
        (h, 0) => format!("{h} hour{}", plural(h)),
        (h, m) => format!("{h} hour{}, {m} minute{}", plural(h), plural(m)),
    }
}

const fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// A bare number is read as minutes, and a bare `0` is accepted so range
/// checks can report it. Returns `None` on malformed or overflowing input.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        return if minutes < 0 {
            None
        } else {
            Duration::try_minutes(minutes)
        };
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if current_num.is_empty() {
            return None;
        } else {
            let num: i64 = current_num.parse().ok()?;
            current_num.clear();

            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(num.checked_mul(unit)?)?;
        }
    }

    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    if total_seconds > 0 {
        Duration::try_seconds(total_seconds)
    } else {
        None
    }
}

/// Parse a duration that must land on a whole number of minutes.
///
/// Used for the configured interval lengths, which are stored in minutes.
///
/// # Errors
///
/// Returns a message suitable for a CLI argument error.
pub fn parse_whole_minutes(s: &str) -> Result<u32, String> {
    let d = parse_duration(s).ok_or_else(|| format!("invalid duration: {s}"))?;
    if d.num_seconds() % 60 != 0 {
        return Err(format!("{s} is not a whole number of minutes"));
    }
    u32::try_from(d.num_minutes()).map_err(|_| format!("duration too large: {s}"))
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let empty = width - filled;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds_mmss() {
        assert_eq!(format_seconds_mmss(1500), "25:00");
        assert_eq!(format_seconds_mmss(90), "01:30");
        assert_eq!(format_seconds_mmss(0), "00:00");
        assert_eq!(format_seconds_mmss(7200), "120:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(25)), "25 minutes");
        assert_eq!(format_duration(Duration::minutes(1)), "1 minute");
        assert_eq!(format_duration(Duration::hours(2)), "2 hours");
        assert_eq!(format_duration(Duration::minutes(90)), "1 hour, 30 minutes");
        assert_eq!(format_duration(Duration::seconds(45)), "45 seconds");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("25"), Some(Duration::minutes(25)));
        assert_eq!(parse_duration("25m"), Some(Duration::minutes(25)));
        assert_eq!(parse_duration("2h30m"), Some(Duration::minutes(150)));
        assert_eq!(parse_duration("1m30s"), Some(Duration::seconds(90)));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_none());
        assert!(parse_duration("abc").is_none());
        assert!(parse_duration("-5").is_none());
        assert!(parse_duration("10x").is_none());
    }

    #[test]
    fn test_parse_whole_minutes() {
        assert_eq!(parse_whole_minutes("45"), Ok(45));
        assert_eq!(parse_whole_minutes("1h"), Ok(60));
        assert!(parse_whole_minutes("90s").is_err());
        assert!(parse_whole_minutes("soon").is_err());
    }

    #[test]
    fn test_parse_zero_is_left_to_range_checks() {
        assert_eq!(parse_duration("0"), Some(Duration::zero()));
        assert_eq!(parse_whole_minutes("0"), Ok(0));
        assert!(parse_duration("0m").is_none());
    }

    #[test]
    fn test_parse_huge_values_are_errors() {
        assert!(parse_duration("9000000000000000000").is_none());
        assert!(parse_duration("3000000000000000h").is_none());
        assert!(parse_duration("99999999999999999999").is_none());
        assert!(parse_whole_minutes("9000000000000000000").is_err());
        assert!(parse_whole_minutes("3000000000000000h").is_err());
        assert!(parse_whole_minutes("5000000000").is_err());
    }

    #[test]
    fn test_render_progress_bar() {
        let bar = render_progress_bar(0.5, 10);
        assert!(bar.contains("█████"));
        assert!(bar.contains("░░░░░"));
        assert_eq!(render_progress_bar(1.5, 4), "[████]");
    }
}
