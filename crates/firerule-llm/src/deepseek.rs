//! DeepSeek Provider Implementation
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint. The defaults
//! target DeepSeek's reasoning model with settings tuned for deterministic
//! JSON extraction.
//!
//! # Features
//!
//! - Explicit configuration passed at construction (endpoint, model, sampling)
//! - Single attempt per call; failures are returned, never retried
//! - Optional request timeout, off by default
//!
//! # Examples
//!
//! ```no_run
//! use firerule_llm::{DeepSeekProvider, ProviderConfig};
//! use firerule_domain::traits::LlmProvider;
//!
//! let config = ProviderConfig::default().with_api_key("sk-...");
//! let provider = DeepSeekProvider::new(config).unwrap();
//! let answer = provider.generate("Say 'hello' and nothing else").unwrap();
//! ```

use crate::LlmError;
use firerule_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";

/// Default reasoning-oriented model
pub const DEFAULT_MODEL: &str = "deepseek-reasoner";

/// Default sampling temperature (low, favoring determinism)
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default cap on completion tokens
pub const DEFAULT_MAX_TOKENS: u32 = 800;

/// Invocation settings for a chat-completions provider
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    /// API base URL, without the `/chat/completions` suffix
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum completion tokens
    pub max_tokens: u32,

    /// Bearer credential; `None` fails at call time
    pub api_key: Option<String>,

    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    /// Set the credential
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion token cap
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key: None,
            timeout: None,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Chat-completions provider for DeepSeek and other OpenAI-compatible APIs
pub struct DeepSeekProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

impl DeepSeekProvider {
    /// Create a provider from explicit settings
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Other` if the HTTP client cannot be built.
    pub fn new(config: ProviderConfig) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Settings this provider was built with
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Send one user prompt and return the completion text
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - No credential is configured, or the service rejects it
    /// - The quota or rate limit is exhausted
    /// - The model is unknown to the service
    /// - Network communication fails
    /// - The response has no completion content
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Authentication("no API key configured".to_string()))?;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let request_body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(
            model = %self.config.model,
            prompt_chars = prompt.chars().count(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    LlmError::Authentication(format!("HTTP {}: {}", status, error_text))
                }
                reqwest::StatusCode::TOO_MANY_REQUESTS | reqwest::StatusCode::PAYMENT_REQUIRED => {
                    LlmError::RateLimitExceeded(format!("HTTP {}: {}", status, error_text))
                }
                reqwest::StatusCode::NOT_FOUND => {
                    LlmError::ModelNotAvailable(self.config.model.clone())
                }
                _ => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &completion.usage {
            info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion received"
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))?
            .message
            .content
            .ok_or_else(|| LlmError::InvalidResponse("Completion has no text content".to_string()))
    }
}

impl LlmProviderTrait for DeepSeekProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        // Blocking wrapper for async function
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?
            .block_on(self.complete(prompt))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> DeepSeekProvider {
        let config = ProviderConfig::default()
            .with_base_url(server.uri())
            .with_api_key("test-key");
        DeepSeekProvider::new(config).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, "deepseek-reasoner");
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.max_tokens, 800);
        assert!(config.api_key.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ProviderConfig::default().with_api_key("sk-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_missing_api_key_fails_at_call_time() {
        let provider = DeepSeekProvider::new(ProviderConfig::default()).unwrap();
        let result = provider.generate("test");
        assert!(matches!(result, Err(LlmError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_complete_sends_fixed_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "deepseek-reasoner",
                "max_tokens": 800,
                "messages": [{"role": "user", "content": "convert this"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"rules\": []}"}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let content = provider_for(&server).complete("convert this").await.unwrap();
        assert_eq!(content, r#"{"rules": []}"#);
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        match provider_for(&server).complete("test").await {
            Err(LlmError::Authentication(message)) => assert!(message.contains("invalid api key")),
            other => panic!("Expected Authentication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_quota_maps_to_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(402).set_body_string("Insufficient Balance"))
            .mount(&server)
            .await;

        let result = provider_for(&server).complete("test").await;
        assert!(matches!(result, Err(LlmError::RateLimitExceeded(_))));
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let result = provider_for(&server).complete("test").await;
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider_for(&server).complete("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let config = ProviderConfig::default()
            .with_base_url("http://127.0.0.1:9")
            .with_api_key("test-key");
        let provider = DeepSeekProvider::new(config).unwrap();

        let result = provider.complete("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
