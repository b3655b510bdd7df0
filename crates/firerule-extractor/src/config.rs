//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Default cap on retained clauses
pub const DEFAULT_MAX_CLAUSES: usize = 30;

/// Default cap on characters sent for extraction
pub const DEFAULT_MAX_CHARS: usize = 3000;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum clauses kept after filtering; earlier clauses win
    pub max_clauses: usize,

    /// Maximum characters of filtered text sent to the LLM
    pub max_chars: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_clauses == 0 {
            return Err("max_clauses must be greater than 0".to_string());
        }
        if self.max_chars == 0 {
            return Err("max_chars must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_clauses: DEFAULT_MAX_CLAUSES,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}
