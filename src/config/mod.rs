//! Configuration management for focusflow.
//!
//! This module handles loading and saving configuration from `~/.focusflow/`.
//! It is also the only place interval lengths are range-checked.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{
    Config, NotificationConfig, TimerSettings, BREAK_MINUTES_RANGE, WORK_MINUTES_RANGE,
};
