//! focusflow - A focus session timer for the terminal
//!
//! This crate provides a work/break interval scheduler with a live
//! countdown, completion alerts, and persisted interval settings.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::FocusError;
pub use features::focus::{Mode, SessionConfig, SessionScheduler, SessionSnapshot};
