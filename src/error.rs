//! Error types for construct operations.
//!
//! This module defines [`ConstructError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ConstructError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `ConstructError::Other`) for unexpected errors
//! - Every error renders as a single human-readable line at the entry point

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for construct operations.
#[derive(Debug, Error)]
pub enum ConstructError {
    /// A save failed in a way that trying another filename will not fix.
    #[error("Cannot write {path}: {source}")]
    UnrecoverableWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every candidate path for a save was blocked.
    #[error("Saving {base} failed after {attempts} attempts")]
    WriteExhausted { base: PathBuf, attempts: usize },

    /// One or more required packages are not installed.
    #[error("Missing required packages: {}", .names.join(", "))]
    MissingDependencies { names: Vec<String> },

    /// One or more required configuration variables are absent or empty.
    #[error("Missing required configuration variables: {}", .names.join(", "))]
    MissingConfiguration { names: Vec<String> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for construct operations.
pub type Result<T> = std::result::Result<T, ConstructError>;
