// Error taxonomy for the patron load pipeline
//
// Fatal conditions (missing input file, bad config) abort the run.
// Data-quality defects (unresolved duplicates, malformed term dates) are
// logged and counted by the stage that finds them, never raised as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Error, Debug)]
pub enum LoadError {
    /// An extract or previous-snapshot file does not exist
    #[error("input file not found: {path}")]
    MissingInputFile { path: PathBuf },

    /// Configuration loading or validation error
    #[error("config error: {0}")]
    Config(String),

    /// I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
