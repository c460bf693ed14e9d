//! Error types for corpus extraction

use thiserror::Error;

/// Errors that abort a whole-corpus load.
///
/// Heuristic misses inside a single chunk are never errors; they leave the
/// affected field empty and the record is still emitted.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to read a source or snapshot file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or write JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input parsed but lacks the structure the pipeline needs
    #[error("Malformed source structure: {0}")]
    Structure(String),

    /// None of the configured inputs exist
    #[error("No data source found: {0}")]
    NoSource(String),

    /// A query argument is outside its accepted range
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
