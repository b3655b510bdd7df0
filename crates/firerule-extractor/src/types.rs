//! Request and report types for extraction runs

use crate::persist::DEFAULT_OUTPUT_PATH;
use std::path::PathBuf;

/// Default regulation input file
pub const DEFAULT_INPUT_PATH: &str = "regulations.txt";

/// One end-to-end extraction: read `input`, write rules to `output`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Regulation text file
    pub input: PathBuf,

    /// Destination for the rule file
    pub output: PathBuf,
}

impl ExtractionRequest {
    /// Create a request for explicit paths
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

impl Default for ExtractionRequest {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH)
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// Where the rules were written
    pub output: PathBuf,

    /// Entries in the persisted `rules` array
    pub rules_written: usize,

    /// Entries that did not validate as complete rules
    pub invalid_rules: usize,

    /// Metadata about the run
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction run
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// Name of the model used
    pub model_name: String,

    /// Unix timestamp (seconds) when the run started
    pub timestamp: u64,

    /// Clauses kept after filtering
    pub clauses_kept: usize,

    /// Clauses dropped by the clause cap
    pub clauses_dropped: usize,

    /// Characters of filtered text sent to the model
    pub chars_sent: usize,

    /// Characters removed by the character cap
    pub chars_truncated: usize,

    /// Wall-clock time for the run in milliseconds
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_paths() {
        let request = ExtractionRequest::default();
        assert_eq!(request.input, PathBuf::from("regulations.txt"));
        assert_eq!(request.output, PathBuf::from("firewall_rules.json"));
    }
}
