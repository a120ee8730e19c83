//! Error types for frepp-catalog
//!
//! This module defines the error hierarchy for a catalog build:
//! - Missing input trees
//! - Date-token and path-layout format errors
//! - Configuration errors
//! - Worker pool errors
//! - I/O and serialization errors
//!
//! Every error aborts the build. Nothing is retried or skipped, so the
//! messages carry the offending path or token.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for a catalog build
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Root (or a subdirectory handed to the walker) does not exist
    #[error("Requested path does not exist: '{}'", path.display())]
    NotFound { path: PathBuf },

    /// Date token or path layout errors
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker pool errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// I/O errors (directory enumeration, output files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal errors, including symlink loops
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Arrow errors while assembling or writing the table
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON serialization error for the descriptor
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while decoding a file's path or name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Date-range token does not follow the grammar
    #[error("Unrecognized date string '{token}': {reason}")]
    DateToken { token: String, reason: String },

    /// Path is not valid UTF-8 and cannot be catalogued verbatim
    #[error("Path '{path}' is not valid UTF-8")]
    NonUtf8Path { path: String },

    /// Path is too shallow for the layout's fixed slots
    #[error(
        "Path '{path}' has no '{slot}' segment: layout needs {required} segments, found {found}"
    )]
    MissingSegment {
        slot: &'static str,
        path: String,
        required: usize,
        found: usize,
    },
}

impl FormatError {
    pub(crate) fn date(token: &str, reason: impl Into<String>) -> Self {
        FormatError::DateToken {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Catalog identifier cannot be used as a file stem
    #[error("Invalid catalog identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    /// Output directory error
    #[error("Invalid output directory '{}': {reason}", path.display())]
    InvalidOutputDir { path: PathBuf, reason: String },
}

/// Worker pool errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker thread could not be spawned
    #[error("Failed to initialize worker {id}: {reason}")]
    InitFailed { id: usize, reason: String },

    /// Worker panicked
    #[error("Worker {id} panicked: {message}")]
    Panicked { id: usize, message: String },

    /// Result channel closed before every task reported back
    #[error("Result channel closed unexpectedly")]
    ResultChannelClosed,
}

/// Result type alias for CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for FormatError
pub type FormatResult<T> = std::result::Result<T, FormatError>;
