//! Work/break session state machine.
//!
//! ```text
//! Running-Work  --(exhausted)--> Idle-Break   completed += 1
//! Running-Break --(exhausted)--> Idle-Work
//! Idle-X        --(toggle)-----> Running-X
//! Running-X     --(toggle)-----> Idle-X
//! any           --(switch)-----> Idle-<other> full duration
//! any           --(reset)------> Idle-<same>  full duration
//! ```
//!
//! Nothing starts on its own: after an interval runs out the next one waits
//! for an explicit [`SessionScheduler::toggle`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::{ClockEvent, SessionClock, TickToken};
use super::display::format_seconds_mmss;
use super::notify::CompletionListener;

/// Kind of interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Focused work.
    Work,
    /// Rest between work intervals.
    Break,
}

impl Mode {
    /// The mode a switch or completion moves to.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }

    /// Heading shown while this mode is active.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Focus Time",
            Self::Break => "Break Time",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "Work"),
            Self::Break => write!(f, "Break"),
        }
    }
}

/// Interval lengths in seconds.
///
/// Values are taken as given; range checks belong to the settings layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub work_seconds: u32,
    pub break_seconds: u32,
}

impl SessionConfig {
    #[must_use]
    pub const fn new(work_seconds: u32, break_seconds: u32) -> Self {
        Self {
            work_seconds,
            break_seconds,
        }
    }

    /// Build a config from whole minutes.
    #[must_use]
    pub const fn from_minutes(work_minutes: u32, break_minutes: u32) -> Self {
        Self::new(work_minutes * 60, break_minutes * 60)
    }

    /// Full length of an interval of `mode`.
    #[must_use]
    pub const fn duration_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_seconds,
            Mode::Break => self.break_seconds,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_minutes(25, 5)
    }
}

/// Read-only copy of the scheduler state, taken after each operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub mode: Mode,
    pub remaining_seconds: u32,
    pub running: bool,
    pub completed_sessions: u32,
}

impl SessionSnapshot {
    /// One-based number of the work session in progress.
    #[must_use]
    pub const fn session_number(&self) -> u32 {
        self.completed_sessions + 1
    }

    /// Remaining time as `MM:SS`.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_seconds_mmss(self.remaining_seconds)
    }
}

#[derive(Debug, Clone, Copy)]
struct SessionState {
    mode: Mode,
    remaining_seconds: u32,
    running: bool,
    completed_sessions: u32,
}

/// Owns the session state and drives the clock.
pub struct SessionScheduler {
    config: SessionConfig,
    state: SessionState,
    clock: SessionClock,
    /// Full length of the countdown currently loaded.
    interval_seconds: u32,
    /// Sum of completed work interval lengths.
    focused_seconds: u64,
    listener: Box<dyn CompletionListener + Send>,
}

impl SessionScheduler {
    /// Create a scheduler idle in work mode.
    pub fn new(config: SessionConfig, listener: impl CompletionListener + Send + 'static) -> Self {
        let remaining = config.work_seconds;
        Self {
            config,
            state: SessionState {
                mode: Mode::Work,
                remaining_seconds: remaining,
                running: false,
                completed_sessions: 0,
            },
            clock: SessionClock::new(remaining),
            interval_seconds: remaining,
            focused_seconds: 0,
            listener: Box::new(listener),
        }
    }

    /// Start or pause the countdown.
    ///
    /// Starting with nothing left on the clock completes the interval
    /// immediately instead of running it.
    pub fn toggle(&mut self) {
        if self.state.running {
            self.clock.stop();
            self.state.running = false;
            debug!(mode = %self.state.mode, remaining = self.state.remaining_seconds, "paused");
        } else if self.state.remaining_seconds == 0 {
            self.on_exhausted();
        } else {
            self.clock.set_remaining(self.state.remaining_seconds);
            self.clock.start();
            self.state.running = true;
            debug!(mode = %self.state.mode, remaining = self.state.remaining_seconds, "started");
        }
    }

    /// Stop and rewind the current mode to its full duration.
    pub fn reset(&mut self) {
        self.clock.stop();
        self.state.running = false;
        self.load(self.state.mode);
        debug!(mode = %self.state.mode, "reset");
    }

    /// Stop and move to the other mode at its full duration.
    ///
    /// Manual switches never count as completed sessions.
    pub fn switch_mode(&mut self) {
        self.clock.stop();
        self.state.running = false;
        self.load(self.state.mode.other());
        debug!(mode = %self.state.mode, "switched mode");
    }

    /// Replace the interval lengths.
    ///
    /// While idle the countdown is reloaded at once. A running countdown is
    /// left alone; the new lengths apply from the next reset, switch, or
    /// completion.
    pub fn update_config(&mut self, config: SessionConfig) {
        self.config = config;
        if self.state.running {
            debug!(?config, "config updated; active countdown unchanged");
        } else {
            self.load(self.state.mode);
            debug!(?config, remaining = self.state.remaining_seconds, "config updated");
        }
    }

    /// Apply one elapsed second on behalf of a tick source.
    ///
    /// Returns `false` when the token is stale and the tick was discarded.
    pub fn tick(&mut self, token: TickToken) -> bool {
        let mut events = Vec::with_capacity(2);
        let applied = self.clock.tick(token, |event| events.push(event));

        for event in events {
            match event {
                ClockEvent::Tick(remaining) => self.on_tick(remaining),
                ClockEvent::Exhausted => self.on_exhausted(),
            }
        }
        applied
    }

    /// Token tick sources should present, or `None` while idle.
    #[must_use]
    pub const fn tick_token(&self) -> Option<TickToken> {
        self.clock.token()
    }

    #[must_use]
    pub const fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.state.mode,
            remaining_seconds: self.state.remaining_seconds,
            running: self.state.running,
            completed_sessions: self.state.completed_sessions,
        }
    }

    #[must_use]
    pub const fn config(&self) -> SessionConfig {
        self.config
    }

    /// Elapsed fraction of the loaded interval (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.interval_seconds == 0 {
            return 1.0;
        }
        let elapsed = self
            .interval_seconds
            .saturating_sub(self.state.remaining_seconds);
        f64::from(elapsed) / f64::from(self.interval_seconds)
    }

    /// Whole minutes spent in completed work intervals.
    ///
    /// Each interval counts at the length it actually ran, so a later
    /// [`update_config`](Self::update_config) does not rewrite the total.
    #[must_use]
    pub const fn minutes_focused(&self) -> u64 {
        self.focused_seconds / 60
    }

    fn on_tick(&mut self, remaining: u32) {
        self.state.remaining_seconds = remaining;
    }

    fn on_exhausted(&mut self) {
        let ended = self.state.mode;
        self.clock.stop();
        self.state.running = false;

        info!(mode = %ended, completed = self.state.completed_sessions, "interval complete");
        self.listener.session_completed(ended);

        if ended == Mode::Work {
            self.state.completed_sessions += 1;
            self.focused_seconds += u64::from(self.interval_seconds);
        }
        self.load(ended.other());
    }

    /// Load `mode` at its full configured duration.
    fn load(&mut self, mode: Mode) {
        let full = self.config.duration_for(mode);
        self.state.mode = mode;
        self.state.remaining_seconds = full;
        self.interval_seconds = full;
        self.clock.set_remaining(full);
    }
}

impl std::fmt::Debug for SessionScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionScheduler")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::notify::MockCompletionListener;
    use mockall::predicate::eq;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<Mode>>>, impl CompletionListener + Send + 'static) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        (log, move |mode: Mode| sink.lock().unwrap().push(mode))
    }

    fn run_ticks(scheduler: &mut SessionScheduler, n: u32) {
        for _ in 0..n {
            let token = scheduler.tick_token().expect("clock should be running");
            assert!(scheduler.tick(token));
        }
    }

    fn silent(config: SessionConfig) -> SessionScheduler {
        SessionScheduler::new(config, |_: Mode| {})
    }

    #[test]
    fn test_initial_state() {
        for (work, brk) in [(1, 1), (60, 30), (1500, 300), (7200, 3600)] {
            let scheduler = silent(SessionConfig::new(work, brk));
            let snap = scheduler.snapshot();
            assert_eq!(snap.mode, Mode::Work);
            assert_eq!(snap.remaining_seconds, work);
            assert!(!snap.running);
            assert_eq!(snap.completed_sessions, 0);
        }
    }

    #[test]
    fn test_ticks_count_down_without_changing_mode() {
        let mut scheduler = silent(SessionConfig::new(10, 5));
        scheduler.toggle();

        for n in 1..10 {
            run_ticks(&mut scheduler, 1);
            let snap = scheduler.snapshot();
            assert_eq!(snap.remaining_seconds, 10 - n);
            assert_eq!(snap.mode, Mode::Work);
            assert!(snap.running);
        }
    }

    #[test]
    fn test_work_exhaustion_moves_to_idle_break() {
        let mut listener = MockCompletionListener::new();
        listener
            .expect_session_completed()
            .with(eq(Mode::Work))
            .times(1)
            .return_const(());

        let mut scheduler = SessionScheduler::new(SessionConfig::new(3, 2), listener);
        scheduler.toggle();
        run_ticks(&mut scheduler, 3);

        let snap = scheduler.snapshot();
        assert_eq!(snap.mode, Mode::Break);
        assert_eq!(snap.remaining_seconds, 2);
        assert!(!snap.running);
        assert_eq!(snap.completed_sessions, 1);
        assert!(scheduler.tick_token().is_none());
    }

    #[test]
    fn test_break_exhaustion_moves_to_idle_work() {
        let mut listener = MockCompletionListener::new();
        listener
            .expect_session_completed()
            .with(eq(Mode::Break))
            .times(1)
            .return_const(());

        let mut scheduler = SessionScheduler::new(SessionConfig::new(3, 2), listener);
        scheduler.switch_mode();
        scheduler.toggle();
        run_ticks(&mut scheduler, 2);

        let snap = scheduler.snapshot();
        assert_eq!(snap.mode, Mode::Work);
        assert_eq!(snap.remaining_seconds, 3);
        assert!(!snap.running);
        assert_eq!(snap.completed_sessions, 0);
    }

    #[test]
    fn test_pomodoro_cycle() {
        let (log, listener) = recorder();
        let mut scheduler = SessionScheduler::new(SessionConfig::new(1500, 300), listener);

        scheduler.toggle();
        run_ticks(&mut scheduler, 1500);
        assert_eq!(*log.lock().unwrap(), vec![Mode::Work]);
        let snap = scheduler.snapshot();
        assert_eq!(snap.completed_sessions, 1);
        assert_eq!(snap.mode, Mode::Break);
        assert_eq!(snap.remaining_seconds, 300);
        assert!(!snap.running);

        scheduler.toggle();
        run_ticks(&mut scheduler, 300);
        assert_eq!(*log.lock().unwrap(), vec![Mode::Work, Mode::Break]);
        let snap = scheduler.snapshot();
        assert_eq!(snap.completed_sessions, 1);
        assert_eq!(snap.mode, Mode::Work);
        assert_eq!(snap.remaining_seconds, 1500);
        assert_eq!(scheduler.minutes_focused(), 25);
    }

    #[test]
    fn test_no_auto_start_after_exhaustion() {
        let mut scheduler = silent(SessionConfig::new(1, 1));
        scheduler.toggle();
        let token = scheduler.tick_token().unwrap();
        scheduler.tick(token);

        assert!(!scheduler.snapshot().running);
        assert!(!scheduler.tick(token));
        assert_eq!(scheduler.snapshot().remaining_seconds, 1);
    }

    #[test]
    fn test_switch_mode_never_counts() {
        let mut listener = MockCompletionListener::new();
        listener.expect_session_completed().times(0);

        let mut scheduler = SessionScheduler::new(SessionConfig::new(10, 5), listener);
        scheduler.switch_mode();
        assert_eq!(scheduler.snapshot().mode, Mode::Break);
        assert_eq!(scheduler.snapshot().remaining_seconds, 5);

        scheduler.toggle();
        run_ticks(&mut scheduler, 2);
        scheduler.switch_mode();

        let snap = scheduler.snapshot();
        assert_eq!(snap.mode, Mode::Work);
        assert_eq!(snap.remaining_seconds, 10);
        assert!(!snap.running);
        assert_eq!(snap.completed_sessions, 0);
    }

    #[test]
    fn test_switch_mode_uses_current_config() {
        let mut scheduler = silent(SessionConfig::new(10, 5));
        scheduler.toggle();
        scheduler.update_config(SessionConfig::new(20, 8));
        scheduler.switch_mode();
        assert_eq!(scheduler.snapshot().remaining_seconds, 8);
    }

    #[test]
    fn test_reset_restores_full_duration() {
        let mut scheduler = silent(SessionConfig::new(3, 10));
        scheduler.toggle();
        run_ticks(&mut scheduler, 3);
        scheduler.toggle();
        run_ticks(&mut scheduler, 4);

        scheduler.reset();
        let snap = scheduler.snapshot();
        assert_eq!(snap.mode, Mode::Break);
        assert_eq!(snap.remaining_seconds, 10);
        assert!(!snap.running);
        assert_eq!(snap.completed_sessions, 1);
    }

    #[test]
    fn test_toggle_twice_keeps_remaining() {
        let mut scheduler = silent(SessionConfig::new(10, 5));
        scheduler.toggle();
        run_ticks(&mut scheduler, 3);

        scheduler.toggle();
        assert!(!scheduler.snapshot().running);
        assert_eq!(scheduler.snapshot().remaining_seconds, 7);

        scheduler.toggle();
        assert!(scheduler.snapshot().running);
        assert_eq!(scheduler.snapshot().remaining_seconds, 7);
    }

    #[test]
    fn test_tick_queued_before_pause_is_discarded() {
        let mut scheduler = silent(SessionConfig::new(10, 5));
        scheduler.toggle();
        let stale = scheduler.tick_token().unwrap();

        scheduler.toggle();
        scheduler.toggle();
        assert!(!scheduler.tick(stale));
        assert_eq!(scheduler.snapshot().remaining_seconds, 10);
    }

    #[test]
    fn test_toggle_at_zero_completes_immediately() {
        let mut listener = MockCompletionListener::new();
        listener
            .expect_session_completed()
            .with(eq(Mode::Work))
            .times(1)
            .return_const(());

        let mut scheduler = SessionScheduler::new(SessionConfig::new(0, 5), listener);
        scheduler.toggle();

        let snap = scheduler.snapshot();
        assert!(!snap.running);
        assert_eq!(snap.mode, Mode::Break);
        assert_eq!(snap.remaining_seconds, 5);
        assert_eq!(snap.completed_sessions, 1);
    }

    #[test]
    fn test_update_config_while_idle_reloads() {
        let mut scheduler = silent(SessionConfig::new(1500, 300));
        scheduler.update_config(SessionConfig::new(10, 5));
        assert_eq!(scheduler.snapshot().remaining_seconds, 10);
        assert_eq!(scheduler.config(), SessionConfig::new(10, 5));
    }

    #[test]
    fn test_update_config_while_running_keeps_countdown() {
        let mut scheduler = silent(SessionConfig::new(1500, 300));
        scheduler.toggle();
        run_ticks(&mut scheduler, 700);
        assert_eq!(scheduler.snapshot().remaining_seconds, 800);

        scheduler.update_config(SessionConfig::new(10, 5));
        assert_eq!(scheduler.snapshot().remaining_seconds, 800);
        run_ticks(&mut scheduler, 1);
        assert_eq!(scheduler.snapshot().remaining_seconds, 799);

        scheduler.reset();
        assert_eq!(scheduler.snapshot().remaining_seconds, 10);
    }

    #[test]
    fn test_update_config_applies_at_exhaustion() {
        let mut scheduler = silent(SessionConfig::new(3, 300));
        scheduler.toggle();
        scheduler.update_config(SessionConfig::new(3, 7));
        run_ticks(&mut scheduler, 3);
        assert_eq!(scheduler.snapshot().remaining_seconds, 7);
    }

    #[test]
    fn test_progress() {
        let mut scheduler = silent(SessionConfig::new(100, 50));
        assert!(scheduler.progress().abs() < f64::EPSILON);

        scheduler.toggle();
        run_ticks(&mut scheduler, 50);
        assert!((scheduler.progress() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_snapshot_helpers() {
        let scheduler = silent(SessionConfig::new(1500, 300));
        let snap = scheduler.snapshot();
        assert_eq!(snap.session_number(), 1);
        assert_eq!(snap.format_remaining(), "25:00");
    }

    #[test]
    fn test_snapshot_serializes() {
        let scheduler = silent(SessionConfig::new(90, 30));
        let json = serde_json::to_value(scheduler.snapshot()).unwrap();
        assert_eq!(json["mode"], "work");
        assert_eq!(json["remaining_seconds"], 90);
        assert_eq!(json["running"], false);
        assert_eq!(json["completed_sessions"], 0);
    }

    #[test]
    fn test_mode_helpers() {
        assert_eq!(Mode::Work.other(), Mode::Break);
        assert_eq!(Mode::Break.other(), Mode::Work);
        assert_eq!(Mode::Work.display_name(), "Focus Time");
        assert_eq!(Mode::Break.to_string(), "Break");
        assert_eq!(SessionConfig::default(), SessionConfig::new(1500, 300));
    }

    #[test]
    fn test_minutes_focused_survives_config_change() {
        let mut scheduler = silent(SessionConfig::new(120, 60));
        scheduler.toggle();
        run_ticks(&mut scheduler, 120);
        assert_eq!(scheduler.minutes_focused(), 2);

        scheduler.update_config(SessionConfig::new(600, 60));
        assert_eq!(scheduler.minutes_focused(), 2);

        scheduler.switch_mode();
        scheduler.toggle();
        run_ticks(&mut scheduler, 600);
        assert_eq!(scheduler.snapshot().completed_sessions, 2);
        assert_eq!(scheduler.minutes_focused(), 12);
    }
}
