//! CLI module for the blogger application
//!
//! Argument parsing and the command dispatcher that drives the post store.
mod app;
mod args;

pub use app::*;
pub use args::*;
