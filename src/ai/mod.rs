//! Model integration module.
//!
//! Everything the planner knows it learns from a hosted generative-language
//! model: a stage formats one prompt string, sends it upstream, and renders
//! the returned prose verbatim. The response is never parsed or validated.

mod gemini;
pub mod prompts;

pub use gemini::GeminiProvider;

use async_trait::async_trait;

/// Trait for language-model providers.
///
/// A provider makes a single best-effort completion call per request: no
/// retries, no backoff, no streaming. Callers retry manually.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send one prompt and return the model's text response.
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// Model call error types.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("GEMINI_API_KEY is not set - add it to your environment or a local .env file")]
    MissingApiKey,

    #[error("model API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model returned no text")]
    Empty,
}

impl ModelError {
    /// Whether this error means the provider was never usable (bad
    /// credential) as opposed to a failed call that may be retried.
    pub fn is_initialization(&self) -> bool {
        matches!(self, Self::MissingApiKey)
    }
}
