//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Trait for the external reasoning service
///
/// Implemented by the infrastructure layer (firerule-llm). Calls are blocking:
/// one prompt in, one completion out.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a completion for a single user prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Identifier of the model answering the prompt
    fn model_name(&self) -> &str {
        "llm"
    }
}
