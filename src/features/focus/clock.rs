//! Tick-driven countdown primitive.
//!
//! The clock does not own a timer thread. A tick source (the TUI event loop
//! or a [`super::shared::BackgroundTicker`]) calls [`SessionClock::tick`]
//! once per elapsed period, presenting the [`TickToken`] it was handed when
//! the clock started. Stopping or restarting the clock invalidates that
//! token, so a tick queued before `stop()` can never mutate the countdown.

use tracing::trace;

/// Identifies one run of the clock, from `start()` to stop or exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

/// Event emitted by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// One second elapsed; carries the new remaining value.
    Tick(u32),
    /// The countdown reached zero. The clock has already stopped itself.
    Exhausted,
}

/// A countdown that decrements by one second per accepted tick.
#[derive(Debug, Clone)]
pub struct SessionClock {
    remaining: u32,
    running: bool,
    run: u64,
}

impl SessionClock {
    /// Create a stopped clock holding `remaining` seconds.
    #[must_use]
    pub const fn new(remaining: u32) -> Self {
        Self {
            remaining,
            running: false,
            run: 0,
        }
    }

    /// Start the clock and return the token ticks must present.
    ///
    /// Starting a running clock is a no-op and returns the current token.
    pub fn start(&mut self) -> TickToken {
        if !self.running {
            self.run = self.run.wrapping_add(1);
            self.running = true;
            trace!(run = self.run, remaining = self.remaining, "clock started");
        }
        TickToken(self.run)
    }

    /// Stop the clock. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            trace!(run = self.run, remaining = self.remaining, "clock stopped");
        }
    }

    /// Overwrite the countdown without touching the running state.
    pub fn set_remaining(&mut self, seconds: u32) {
        self.remaining = seconds;
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Token of the current run, or `None` while stopped.
    #[must_use]
    pub const fn token(&self) -> Option<TickToken> {
        if self.running {
            Some(TickToken(self.run))
        } else {
            None
        }
    }

    /// Apply one elapsed period.
    ///
    /// Emits `Tick(remaining)` after decrementing. The tick that brings the
    /// countdown to zero also emits `Exhausted`; a tick arriving at zero emits
    /// only `Exhausted`. Either way the clock stops itself.
    ///
    /// Ticks for a stale token, or for a stopped clock, are discarded and
    /// nothing is emitted. Returns whether the tick was applied.
    pub fn tick(&mut self, token: TickToken, mut emit: impl FnMut(ClockEvent)) -> bool {
        if !self.running || token.0 != self.run {
            trace!(?token, run = self.run, "discarding stale tick");
            return false;
        }

        match self.remaining.checked_sub(1) {
            Some(next) => {
                self.remaining = next;
                emit(ClockEvent::Tick(next));
                if next == 0 {
                    self.running = false;
                    emit(ClockEvent::Exhausted);
                }
            }
            None => {
                self.running = false;
                emit(ClockEvent::Exhausted);
            }
        }
        true
    }
}
