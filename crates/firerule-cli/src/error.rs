//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extraction pipeline error
    #[error(transparent)]
    Extractor(#[from] firerule_extractor::ExtractorError),

    /// Provider construction error
    #[error("LLM provider error: {0}")]
    Llm(#[from] firerule_llm::LlmError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A checked value violates one or more rules
    #[error("{0} rule violation(s) found")]
    Violations(usize),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Violations(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firerule_extractor::ExtractorError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Config("bad".into()).exit_code(), 1);
        assert_eq!(
            CliError::from(ExtractorError::Schema("not json".into())).exit_code(),
            1
        );
        assert_eq!(CliError::Violations(3).exit_code(), 2);
    }

    #[test]
    fn test_extractor_message_is_passed_through() {
        let err = CliError::from(ExtractorError::Service("timed out".into()));
        assert_eq!(err.to_string(), "LLM call failed: timed out");
    }
}
