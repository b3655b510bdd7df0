//! Error types for the Extractor

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during extraction
///
/// Every variant is fatal for a run; no stage recovers locally.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Input file missing or unreadable
    #[error("Failed to read input {}: {}", .path.display(), .source)]
    InputIo {
        /// Input path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reasoning service could not be invoked or returned an error
    #[error("LLM call failed: {0}")]
    Service(String),

    /// Response is not JSON or lacks the `rules` array
    #[error("Invalid rule payload: {0}")]
    Schema(String),

    /// Destination not writable
    #[error("Failed to write output {}: {}", .path.display(), .source)]
    OutputIo {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::Schema(e.to_string())
    }
}
