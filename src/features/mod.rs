//! Feature modules for focusflow.

pub mod focus;
