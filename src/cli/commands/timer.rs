//! Timer command implementation.
//!
//! Opens the full-screen timer, or the line-mode variant with `--plain`.

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use colored::Colorize;
use tracing::{debug, info};

use crate::cli::args::{OutputFormat, TimerArgs};
use crate::config::{Config, NotificationConfig, Paths};
use crate::error::FocusError;
use crate::features::focus::{
    BackgroundTicker, Mode, SessionConfig, SessionScheduler, SessionSnapshot, SharedScheduler,
    ToastListener, TICK_PERIOD,
};
use crate::output::{format_snapshot_json, format_status_line};
use crate::tui;

/// Execute the timer command.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded, an override is out of
/// range, or the terminal fails.
pub fn timer(paths: &Paths, args: &TimerArgs, format: OutputFormat) -> Result<String, FocusError> {
    let config = Config::load_from_path(&paths.config_file)?;
    let settings = config.timer.with_overrides(args.work, args.break_minutes)?;
    let session = settings.session_config();
    info!(
        work_minutes = settings.work_minutes,
        break_minutes = settings.break_minutes,
        plain = args.plain,
        "starting timer"
    );

    if args.plain {
        let stdin = io::stdin();
        run_plain(
            session,
            config.notifications,
            TICK_PERIOD,
            stdin.lock(),
            io::stdout(),
            format,
        )
    } else {
        tui::run(session, config.notifications.enabled)?;
        Ok(String::new())
    }
}

/// Writer shared between the input loop, the ticker thread, and the
/// completion listener.
struct SharedOut<W>(Arc<Mutex<W>>);

impl<W> Clone for SharedOut<W> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<W: Write> Write for SharedOut<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).flush()
    }
}

/// Run the line-mode timer until `q` or end of input.
///
/// Returns the closing summary.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_plain<R, W>(
    session: SessionConfig,
    notifications: NotificationConfig,
    period: Duration,
    input: R,
    out: W,
    format: OutputFormat,
) -> Result<String, FocusError>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    let mut out = SharedOut(Arc::new(Mutex::new(out)));

    let scheduler = if notifications.enabled {
        SessionScheduler::new(session, ToastListener::new(out.clone(), notifications.sound))
    } else {
        SessionScheduler::new(session, |mode: Mode| {
            debug!(%mode, "interval complete; notifications disabled");
        })
    };
    let shared = SharedScheduler::new(scheduler);

    let mut tick_out = out.clone();
    let ticker = BackgroundTicker::spawn(shared.clone(), period, move |snapshot| {
        let line = format_status_line(&snapshot, session);
        // Rewrites the current line; nothing useful to do if the terminal is gone.
        let _ = write!(tick_out, "\r{line}").and_then(|()| tick_out.flush());
    })?;

    writeln!(
        out,
        "{}",
        "<enter> start/pause · r reset · s switch mode · q quit".dimmed()
    )?;
    writeln!(out, "{}", format_status_line(&shared.snapshot(), session))?;

    for line in input.lines() {
        let line = line?;
        let snapshot = match line.trim() {
            "" | "t" => shared.toggle(),
            "r" => shared.reset(),
            "s" => shared.switch_mode(),
            "q" => break,
            other => {
                writeln!(out, "{}", format!("unknown command: {other}").yellow())?;
                continue;
            }
        };
        writeln!(out, "{}", format_status_line(&snapshot, session))?;
    }

    ticker.shutdown();
    out.flush()?;

    let snapshot = shared.snapshot();
    let minutes = shared.with(|s| s.minutes_focused());
    info!(completed = snapshot.completed_sessions, minutes, "timer closed");
    summary(&snapshot, minutes, format)
}

fn summary(
    snapshot: &SessionSnapshot,
    minutes_focused: u64,
    format: OutputFormat,
) -> Result<String, FocusError> {
    match format {
        OutputFormat::Json => format_snapshot_json(snapshot),
        OutputFormat::Pretty => Ok(format!(
            "Completed {} session{} ({} minutes focused)",
            snapshot.completed_sessions,
            if snapshot.completed_sessions == 1 { "" } else { "s" },
            minutes_focused
        )),
    }
}
