//! Local blog management library
//!
//! Create, edit, search and filter short blog posts kept as a single JSON
//! collection in a local key-value store.

mod cli;
mod config;
mod errors;
mod form;
mod kv;
mod post;
mod render;
mod samples;
mod storage;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use form::*;
pub use kv::*;
pub use post::*;
pub use render::*;
pub use samples::*;
pub use storage::*;
pub use types::*;
