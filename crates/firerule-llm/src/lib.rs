//! Firerule LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `firerule-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `DeepSeekProvider`: OpenAI-compatible chat completions (DeepSeek by default)
//!
//! # Examples
//!
//! ```
//! use firerule_llm::MockProvider;
//! use firerule_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new(r#"{"rules": []}"#);
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, r#"{"rules": []}"#);
//! ```

#![warn(missing_docs)]

pub mod deepseek;

use firerule_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use deepseek::{DeepSeekProvider, ProviderConfig};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credential missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls and
/// records every prompt it receives.
///
/// # Examples
///
/// ```
/// use firerule_llm::MockProvider;
/// use firerule_domain::traits::LlmProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_error("prompt2", "quota exhausted");
/// assert_eq!(provider.generate("prompt1").unwrap(), "response1");
/// assert!(provider.generate("prompt2").is_err());
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    model_name: String,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// Create a MockProvider that fails every prompt with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_default(MockReply::Error(message.into()))
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            replies: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            model_name: "mock".to_string(),
        }
    }

    /// Set the model name reported to callers
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.replies).insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, message: impl Into<String>) {
        lock(&self.replies).insert(prompt.into(), MockReply::Error(message.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// The most recent prompt, if any
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.prompts).last().cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        lock(&self.prompts).push(prompt.to_string());

        let reply = lock(&self.replies)
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(message) => Err(LlmError::Other(message)),
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

// A panicking test must not poison every later call on a shared clone
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("hello").unwrap(), "world");
        assert_eq!(provider.generate("foo").unwrap(), "bar");
        assert_eq!(provider.generate("unknown").unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_provider_records_prompts() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);
        assert_eq!(provider.last_prompt(), None);

        provider.generate("prompt1").unwrap();
        provider.generate("prompt2").unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.last_prompt().as_deref(), Some("prompt2"));
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt", "quota exhausted");

        let result = provider.generate("bad prompt");
        match result {
            Err(LlmError::Other(message)) => assert_eq!(message, "quota exhausted"),
            other => panic!("Expected Other error, got {:?}", other),
        }
    }

    #[test]
    fn test_failing_provider() {
        let provider = MockProvider::failing("connection refused");
        assert!(provider.generate("anything").is_err());
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_mock_provider_clone_shares_history() {
        let provider1 = MockProvider::new("test").with_model_name("deepseek-reasoner");
        let provider2 = provider1.clone();

        provider1.generate("test").unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
        assert_eq!(provider2.model_name(), "deepseek-reasoner");
    }
}
