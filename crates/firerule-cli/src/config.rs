//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use firerule_extractor::{ExtractorConfig, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use firerule_llm::deepseek::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use firerule_llm::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the API key unless configured otherwise.
pub const DEFAULT_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Clause filter caps
    #[serde(default)]
    pub filter: ExtractorConfig,

    /// Reasoning service settings
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Default file locations
    #[serde(default)]
    pub paths: PathSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Reasoning service settings.
///
/// The credential itself never lives in the file, only the name of the
/// environment variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API base URL
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Completion token cap
    pub max_tokens: u32,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Request timeout in seconds; unset waits indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Default file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Regulation text file
    pub input: PathBuf,

    /// Rules file
    pub output: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".firerule").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validate all sections.
    pub fn validate(&self) -> Result<()> {
        self.filter.validate().map_err(CliError::Config)?;

        let provider = &self.provider;
        if !(0.0..=2.0).contains(&provider.temperature) {
            return Err(CliError::Config(format!(
                "temperature {} out of range [0.0, 2.0]",
                provider.temperature
            )));
        }
        if provider.max_tokens == 0 {
            return Err(CliError::Config(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        if provider.api_key_env.trim().is_empty() {
            return Err(CliError::Config("api_key_env must not be empty".to_string()));
        }
        Ok(())
    }

    /// Build provider settings, reading the key from the environment.
    pub fn provider_config(&self) -> ProviderConfig {
        let settings = &self.provider;
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            debug!("{} is not set", settings.api_key_env);
        }

        let mut config = ProviderConfig::default()
            .with_base_url(&settings.base_url)
            .with_model(&settings.model)
            .with_temperature(settings.temperature)
            .with_max_tokens(settings.max_tokens);
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        if let Some(secs) = settings.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
