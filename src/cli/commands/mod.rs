//! Command implementations for focusflow.
//!
//! Each command returns the text to print; an empty string prints nothing.

mod completions;
mod settings;
mod timer;

pub use completions::completions;
pub use settings::settings;
pub use timer::{run_plain, timer};
