//! Gemini API integration.
//!
//! Implements the ModelProvider trait for Google's Gemini API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ModelError, ModelProvider};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API provider.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// Reads the API key from the GEMINI_API_KEY environment variable once;
    /// the credential is immutable for the life of the provider.
    pub fn new() -> Result<Self, ModelError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ModelError::MissingApiKey)?;

        Ok(Self { client: Client::new(), api_key, model: "gemini-pro".to_string() })
    }

    /// Create with a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Make a request to the Gemini generateContent endpoint.
    async fn request(&self, prompt: &str) -> Result<String, ModelError> {
        let request = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
        };

        let response = self
            .client
            .post(format!("{API_BASE}/{}:generateContent", self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api { status, body });
        }

        let response: GenerateResponse = response.json().await?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(ModelError::Empty)
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        self.request(prompt).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Gemini generateContent request structure.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

/// A content block in a request or response.
#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

/// A text part within a content block.
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Gemini generateContent response structure.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// A candidate completion in a response.
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
