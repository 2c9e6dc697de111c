//! Focus session scheduling.
//!
//! A [`SessionScheduler`] alternates work and break intervals:
//! - [`SessionClock`] counts down one second per accepted tick
//! - the scheduler switches modes and counts completed work sessions
//! - a [`CompletionListener`] hears about every interval that runs out
//!
//! Tick sources live beside the core: [`Pacer`] for single-threaded event
//! loops, [`BackgroundTicker`] for a scheduler behind [`SharedScheduler`].

pub mod clock;
pub mod display;
pub mod notify;
pub mod pacer;
pub mod scheduler;
pub mod shared;

pub use clock::{ClockEvent, SessionClock, TickToken};
pub use display::{format_duration, format_seconds_mmss, parse_whole_minutes, render_progress_bar};
pub use notify::{completion_message, ChannelListener, CompletionListener, ToastListener};
pub use pacer::{Pacer, TICK_PERIOD};
pub use scheduler::{Mode, SessionConfig, SessionScheduler, SessionSnapshot};
pub use shared::{BackgroundTicker, SharedScheduler};
