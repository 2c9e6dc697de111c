//! Completion notifications.
//!
//! The scheduler reports every exhausted interval to a single
//! [`CompletionListener`]. How the message reaches the user (toast line,
//! status bar, bell) is entirely up to the listener.

use std::io::Write;
use std::sync::mpsc::Sender;

use colored::Colorize;
use tracing::{debug, warn};

use super::scheduler::Mode;

/// Receives one call per exhausted interval, tagged with the mode that ended.
///
/// Closures taking a [`Mode`] implement this directly.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionListener {
    /// An interval of `ended` mode just ran out.
    fn session_completed(&mut self, ended: Mode);
}

impl<F> CompletionListener for F
where
    F: FnMut(Mode),
{
    fn session_completed(&mut self, ended: Mode) {
        self(ended);
    }
}

/// User-facing message for a finished interval.
#[must_use]
pub const fn completion_message(ended: Mode) -> &'static str {
    match ended {
        Mode::Work => "Focus session complete! Time for a break.",
        Mode::Break => "Break over! Ready to focus again?",
    }
}

/// Writes a colored toast line to a writer, optionally ringing the bell.
pub struct ToastListener<W: Write + Send> {
    out: W,
    bell: bool,
}

impl<W: Write + Send> ToastListener<W> {
    /// Create a listener writing to `out`.
    pub const fn new(out: W, bell: bool) -> Self {
        Self { out, bell }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> CompletionListener for ToastListener<W> {
    fn session_completed(&mut self, ended: Mode) {
        let icon = match ended {
            Mode::Work => "☕",
            Mode::Break => "🎯",
        };
        let bell = if self.bell { "\x07" } else { "" };
        let line = format!("{icon} {}", completion_message(ended)).green().bold();

        if let Err(e) = writeln!(self.out, "\n{line}{bell}").and_then(|()| self.out.flush()) {
            warn!(error = %e, "failed to write completion toast");
        }
    }
}

/// Forwards completions over a channel to the owning event loop.
pub struct ChannelListener {
    tx: Sender<Mode>,
}

impl ChannelListener {
    #[must_use]
    pub const fn new(tx: Sender<Mode>) -> Self {
        Self { tx }
    }
}

impl CompletionListener for ChannelListener {
    fn session_completed(&mut self, ended: Mode) {
        if self.tx.send(ended).is_err() {
            debug!(?ended, "completion receiver dropped");
        }
    }
}
