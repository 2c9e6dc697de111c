//! Deadline-based tick source for single-threaded event loops.
//!
//! The loop asks the pacer how long it may block waiting for input, then
//! collects due ticks. After every operation on the scheduler the loop calls
//! [`Pacer::sync`] with the scheduler's current token; when the clock has
//! stopped or restarted, the pending deadline is dropped on the spot.

use std::time::{Duration, Instant};

use tracing::trace;

use super::clock::TickToken;

/// Length of one tick in production.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Schedules ticks for one clock run at a fixed period.
#[derive(Debug, Clone)]
pub struct Pacer {
    period: Duration,
    armed: Option<(TickToken, Instant)>,
}

impl Pacer {
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            armed: None,
        }
    }

    /// Align with the clock run identified by `token`.
    ///
    /// A new token arms the first tick one period from `now`; `None` disarms
    /// and discards whatever tick was pending.
    pub fn sync(&mut self, token: Option<TickToken>, now: Instant) {
        match (token, self.armed) {
            (None, None) => {}
            (None, Some((old, _))) => {
                trace!(?old, "pacer disarmed");
                self.armed = None;
            }
            (Some(t), Some((current, _))) if t == current => {}
            (Some(t), _) => {
                trace!(token = ?t, "pacer armed");
                self.armed = Some((t, now + self.period));
            }
        }
    }

    /// How long the loop may block before the next tick is due.
    ///
    /// Returns `idle` while disarmed.
    #[must_use]
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        self.armed.map_or(idle, |(_, deadline)| {
            deadline.saturating_duration_since(now).min(idle)
        })
    }

    /// Take the next tick if its deadline has passed.
    ///
    /// Call repeatedly to catch up after the loop was delayed by more than a
    /// period.
    pub fn due(&mut self, now: Instant) -> Option<TickToken> {
        let (token, deadline) = self.armed?;
        if now < deadline {
            return None;
        }
        self.armed = Some((token, deadline + self.period));
        Some(token)
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::clock::SessionClock;

    const IDLE: Duration = Duration::from_millis(250);

    #[test]
    fn test_disarmed_pacer_waits_idle() {
        let mut pacer = Pacer::default();
        let now = Instant::now();
        assert!(!pacer.is_armed());
        assert_eq!(pacer.timeout(now, IDLE), IDLE);
        assert!(pacer.due(now + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn test_first_tick_after_one_period() {
        let mut clock = SessionClock::new(10);
        let token = clock.start();
        let mut pacer = Pacer::default();
        let start = Instant::now();

        pacer.sync(Some(token), start);
        assert!(pacer.due(start + Duration::from_millis(999)).is_none());
        assert_eq!(pacer.due(start + TICK_PERIOD), Some(token));
        assert!(pacer.due(start + TICK_PERIOD).is_none());
    }

    #[test]
    fn test_timeout_shrinks_toward_deadline() {
        let mut clock = SessionClock::new(10);
        let mut pacer = Pacer::default();
        let start = Instant::now();
        pacer.sync(clock.token(), start);
        pacer.sync(Some(clock.start()), start);

        assert_eq!(
            pacer.timeout(start + Duration::from_millis(900), IDLE),
            Duration::from_millis(100)
        );
        assert_eq!(pacer.timeout(start + Duration::from_secs(3), IDLE), Duration::ZERO);
    }

    #[test]
    fn test_catches_up_missed_ticks() {
        let mut clock = SessionClock::new(10);
        let token = clock.start();
        let mut pacer = Pacer::default();
        let start = Instant::now();
        pacer.sync(Some(token), start);

        let late = start + Duration::from_millis(3500);
        let mut count = 0;
        while pacer.due(late).is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn test_sync_with_same_token_keeps_deadline() {
        let mut clock = SessionClock::new(10);
        let token = clock.start();
        let mut pacer = Pacer::default();
        let start = Instant::now();

        pacer.sync(Some(token), start);
        pacer.sync(Some(token), start + Duration::from_millis(600));
        assert_eq!(pacer.due(start + TICK_PERIOD), Some(token));
    }

    #[test]
    fn test_stop_discards_pending_tick() {
        let mut clock = SessionClock::new(10);
        let token = clock.start();
        let mut pacer = Pacer::default();
        let start = Instant::now();
        pacer.sync(Some(token), start);

        clock.stop();
        pacer.sync(clock.token(), start + Duration::from_millis(10));
        assert!(!pacer.is_armed());
        assert!(pacer.due(start + Duration::from_secs(2)).is_none());
    }

    #[test]
    fn test_restart_rearms_with_new_token() {
        let mut clock = SessionClock::new(10);
        let old = clock.start();
        let mut pacer = Pacer::default();
        let start = Instant::now();
        pacer.sync(Some(old), start);

        clock.stop();
        let new = clock.start();
        let later = start + Duration::from_millis(500);
        pacer.sync(Some(new), later);

        assert!(pacer.due(start + TICK_PERIOD).is_none());
        assert_eq!(pacer.due(later + TICK_PERIOD), Some(new));
    }
}
