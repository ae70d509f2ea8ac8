//! Ollama backend implementation
//!
//! Sends the extraction prompt to `POST {host}/api/generate` as a single
//! non-streaming request. There is no retry and no timeout: a failed call
//! fails the message.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::ExtractedExpense;

use super::parsing::parse_expense;
use super::prompts::render_extraction_prompt;
use super::AIBackend;

/// Default Ollama server when `OLLAMA_HOST` is not set
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Default model when `OLLAMA_MODEL` is not set
pub const DEFAULT_MODEL: &str = "mistral";

#[derive(Clone)]
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(&host, &model)
    }

    /// Send a prompt and return the raw model text
    async fn generate(&self, prompt: String) -> Result<String, ExtractionError> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractionError::InferenceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExtractionError::InferenceUnavailable(format!(
                "HTTP {} from {}",
                response.status(),
                self.base_url
            )));
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::InferenceUnavailable(e.to_string()))?;

        Ok(ollama_response.response)
    }
}

/// Request to Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl AIBackend for OllamaBackend {
    async fn extract_expense(&self, text: &str) -> Result<ExtractedExpense, ExtractionError> {
        let prompt = render_extraction_prompt(text);
        let raw = self.generate(prompt).await?;
        debug!("Ollama response: {}", raw);

        parse_expense(&raw, text)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
