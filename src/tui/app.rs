//! Application state for the TUI.

use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::features::focus::{
    completion_message, ChannelListener, Mode, Pacer, SessionConfig, SessionScheduler,
    SessionSnapshot, TICK_PERIOD,
};
use crate::tui::event::Action;

/// Longest the loop blocks on input while no tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Help line shown on `?` and at startup.
pub const HELP: &str = "space:start/pause | r:reset | s:switch mode | q:quit";

/// Application state.
pub struct App {
    /// The session state machine.
    pub scheduler: SessionScheduler,
    /// Completions reported by the scheduler, drained after each step.
    completions: Receiver<Mode>,
    /// Tick deadlines for the running countdown.
    pacer: Pacer,
    /// Whether completion toasts are shown.
    notifications: bool,
    /// Status message to display.
    pub status: Option<String>,
    /// Most recent completion and when it happened.
    pub last_completion: Option<(Mode, DateTime<Local>)>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create an app idle at the start of a work interval.
    #[must_use]
    pub fn new(config: SessionConfig, notifications: bool) -> Self {
        Self::with_period(config, notifications, TICK_PERIOD)
    }

    /// Create an app whose ticks fire every `period`.
    #[must_use]
    pub fn with_period(config: SessionConfig, notifications: bool, period: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            scheduler: SessionScheduler::new(config, ChannelListener::new(tx)),
            completions: rx,
            pacer: Pacer::new(period),
            notifications,
            status: Some("Press ? for help".to_string()),
            last_completion: None,
            should_quit: false,
        }
    }

    #[must_use]
    pub const fn snapshot(&self) -> SessionSnapshot {
        self.scheduler.snapshot()
    }

    /// How long the event loop may wait for input.
    #[must_use]
    pub fn timeout(&self, now: Instant) -> Duration {
        self.pacer.timeout(now, IDLE_POLL)
    }

    /// Apply a user action.
    pub fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::Toggle => {
                self.status = None;
                self.scheduler.toggle();
            }
            Action::Reset => {
                self.scheduler.reset();
                self.status = Some("Timer reset".to_string());
            }
            Action::SwitchMode => {
                self.scheduler.switch_mode();
                self.status = Some(format!("Switched to {}", self.snapshot().mode.display_name()));
            }
            Action::Help => {
                self.status = Some(HELP.to_string());
            }
            Action::Quit => {
                self.should_quit = true;
            }
        }

        let token = if self.should_quit {
            None
        } else {
            self.scheduler.tick_token()
        };
        self.pacer.sync(token, now);
        self.drain_completions();
    }

    /// Apply every tick that is due at `now`.
    pub fn tick_due(&mut self, now: Instant) {
        while let Some(token) = self.pacer.due(now) {
            self.scheduler.tick(token);
            self.pacer.sync(self.scheduler.tick_token(), now);
        }
        self.drain_completions();
    }

    fn drain_completions(&mut self) {
        while let Ok(mode) = self.completions.try_recv() {
            debug!(%mode, "completion shown");
            self.last_completion = Some((mode, Local::now()));
            if self.notifications {
                self.status = Some(completion_message(mode).to_string());
            }
        }
    }
}
