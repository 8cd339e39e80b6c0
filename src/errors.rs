//! Error types for the blogger application.
//!
//! Lookups of unknown posts are not errors at the storage layer (they return
//! `None` or `false`); the variants here cover backend failures and the
//! command-line surface.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::FieldError;

/// The main error type for the blogger application.
#[derive(Error, Debug)]
pub enum BlogError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Post was not found when performing an operation.
    #[error("Blog post not found: {id}")]
    PostNotFound { id: String },

    /// Invalid stored data or user supplied value.
    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    /// Form input rejected before reaching the store.
    #[error("Invalid input: {}", format_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    #[error("{message}")]
    EditorError { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
