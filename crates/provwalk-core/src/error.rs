//! Error types for provwalk-core.

use thiserror::Error;

/// Error type for provenance corpus operations.
///
/// Only input loading and configuration can fail. Graph indexing, walking,
/// neighborhood extraction and temporal rendering are total.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid walk or corpus configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A walk was built from an empty node sequence.
    #[error("Walk must contain at least the start node")]
    EmptyWalk,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for provenance corpus operations.
pub type Result<T> = std::result::Result<T, Error>;
