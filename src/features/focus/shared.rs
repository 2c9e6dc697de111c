//! Thread-safe scheduler handle and a background tick thread.
//!
//! All access goes through one mutex, so every operation and every tick is
//! applied atomically and in order. Every operation also wakes the tick
//! thread, which re-syncs a [`Pacer`] with the scheduler's token on the spot:
//! a start arms the first tick one period later, a pause drops it.
//! [`BackgroundTicker`] owns its thread: dropping the guard stops and joins
//! it, on every exit path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::pacer::Pacer;
use super::scheduler::{SessionConfig, SessionScheduler, SessionSnapshot};
use crate::error::FocusError;

#[derive(Debug)]
struct Inner {
    scheduler: Mutex<SessionScheduler>,
    /// Signalled after every operation and on ticker shutdown.
    changed: Condvar,
}

impl Inner {
    /// Scheduler operations never leave partial state behind, so a poisoned
    /// lock is recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, SessionScheduler> {
        self.scheduler.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cloneable handle to a scheduler shared between threads.
#[derive(Clone, Debug)]
pub struct SharedScheduler {
    inner: Arc<Inner>,
}

impl SharedScheduler {
    #[must_use]
    pub fn new(scheduler: SessionScheduler) -> Self {
        Self {
            inner: Arc::new(Inner {
                scheduler: Mutex::new(scheduler),
                changed: Condvar::new(),
            }),
        }
    }

    /// Run `f` with exclusive access to the scheduler, then wake the tick
    /// thread.
    pub fn with<R>(&self, f: impl FnOnce(&mut SessionScheduler) -> R) -> R {
        let result = f(&mut self.inner.lock());
        self.inner.changed.notify_all();
        result
    }

    pub fn toggle(&self) -> SessionSnapshot {
        self.with(|s| {
            s.toggle();
            s.snapshot()
        })
    }

    pub fn reset(&self) -> SessionSnapshot {
        self.with(|s| {
            s.reset();
            s.snapshot()
        })
    }

    pub fn switch_mode(&self) -> SessionSnapshot {
        self.with(|s| {
            s.switch_mode();
            s.snapshot()
        })
    }

    pub fn update_config(&self, config: SessionConfig) -> SessionSnapshot {
        self.with(|s| {
            s.update_config(config);
            s.snapshot()
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().snapshot()
    }
}

/// Guard for a thread that ticks a [`SharedScheduler`] once per period.
///
/// The thread paces ticks the same way a single-threaded loop does with a
/// [`Pacer`]. The token is re-read under the lock before every tick, so a
/// pause or restart drops the pending tick.
#[derive(Debug)]
pub struct BackgroundTicker {
    shared: SharedScheduler,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundTicker {
    /// Spawn the tick thread. `on_tick` receives a snapshot after every
    /// applied tick, outside the lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(
        shared: SharedScheduler,
        period: Duration,
        mut on_tick: impl FnMut(SessionSnapshot) + Send + 'static,
    ) -> Result<Self, FocusError> {
        let stop = Arc::new(AtomicBool::new(false));
        let inner = Arc::clone(&shared.inner);
        let thread_stop = Arc::clone(&stop);

        let handle = std::thread::Builder::new()
            .name("focusflow-ticker".to_string())
            .spawn(move || {
                let mut pacer = Pacer::new(period);
                let mut guard = inner.lock();
                while !thread_stop.load(Ordering::Acquire) {
                    let now = Instant::now();
                    pacer.sync(guard.tick_token(), now);

                    let mut applied = Vec::new();
                    while let Some(token) = pacer.due(now) {
                        if guard.tick(token) {
                            applied.push(guard.snapshot());
                        }
                        pacer.sync(guard.tick_token(), now);
                    }

                    if applied.is_empty() {
                        let timeout = pacer.timeout(now, period);
                        guard = inner
                            .changed
                            .wait_timeout(guard, timeout)
                            .unwrap_or_else(PoisonError::into_inner)
                            .0;
                    } else {
                        drop(guard);
                        applied.into_iter().for_each(&mut on_tick);
                        guard = inner.lock();
                    }
                }
                debug!("ticker thread exiting");
            })?;

        Ok(Self {
            shared,
            stop,
            handle: Some(handle),
        })
    }

    /// Stop the thread and wait for it to exit.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for BackgroundTicker {
    fn drop(&mut self) {
        {
            // Set under the lock so the thread cannot miss the wakeup between
            // checking the flag and waiting.
            let _guard = self.shared.inner.lock();
            self.stop.store(true, Ordering::Release);
            self.shared.inner.changed.notify_all();
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("ticker thread panicked");
            }
        }
    }
}
