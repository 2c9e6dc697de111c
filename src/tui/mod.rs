//! Terminal User Interface (TUI) for focusflow.
//!
//! Full-screen countdown with keyboard controls.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;
pub use event::{action_for_key, Action};

use std::io::{self, Stdout};
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::error::FocusError;
use crate::features::focus::SessionConfig;

/// Owns the terminal while the TUI is open and restores it on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self, FocusError> {
        enable_raw_mode()
            .map_err(|e| FocusError::Terminal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            disable_raw_mode().ok();
            return Err(FocusError::Terminal(format!("Failed to setup terminal: {e}")));
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                disable_raw_mode().ok();
                execute!(io::stdout(), LeaveAlternateScreen).ok();
                Err(FocusError::Terminal(format!("Failed to create terminal: {e}")))
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        disable_raw_mode().ok();
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).ok();
        self.terminal.show_cursor().ok();
    }
}

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(config: SessionConfig, notifications: bool) -> Result<(), FocusError> {
    let mut session = TerminalSession::enter()?;
    let mut app = App::new(config, notifications);

    let result = run_app(&mut session.terminal, &mut app);

    let snap = app.snapshot();
    info!(
        completed = snap.completed_sessions,
        minutes = app.scheduler.minutes_focused(),
        "timer closed"
    );
    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), FocusError> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| FocusError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = app.timeout(Instant::now());
        if let Some(action) = event::handle_events(timeout)? {
            app.apply(action, Instant::now());
        }

        if app.should_quit {
            break;
        }

        app.tick_due(Instant::now());
    }

    Ok(())
}
