//! Local AI backend abstraction
//!
//! The extraction step is a single prompt/response call against a local
//! inference server. Backends only differ in how they obtain the raw model
//! output; every backend validates through `parsing::parse_expense`.
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (ollama, mock). Default: ollama
//! - `OLLAMA_HOST`: Ollama server URL (default: http://localhost:11434)
//! - `OLLAMA_MODEL`: Model name (default: mistral)

mod mock;
mod ollama;
pub mod parsing;
pub mod prompts;

pub use mock::MockBackend;
pub use ollama::{
    OllamaBackend, DEFAULT_HOST as DEFAULT_OLLAMA_HOST, DEFAULT_MODEL as DEFAULT_OLLAMA_MODEL,
};

#[cfg(any(test, feature = "test-utils"))]
pub(crate) use mock::mock_model_output;

use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::models::ExtractedExpense;

/// Trait defining the interface for all AI backends
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Turn an expense-like message into a validated expense
    ///
    /// Makes exactly one inference call. Never persists anything.
    async fn extract_expense(&self, text: &str) -> Result<ExtractedExpense, ExtractionError>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `ollama` (default): Uses OLLAMA_HOST and OLLAMA_MODEL
    /// - `mock`: Keyword-based mock, no server needed
    pub fn from_env() -> Self {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "ollama".to_string());

        match backend.to_lowercase().as_str() {
            "ollama" => AIClient::Ollama(OllamaBackend::from_env()),
            "mock" => AIClient::Mock(MockBackend::new()),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to ollama");
                AIClient::Ollama(OllamaBackend::from_env())
            }
        }
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str) -> Self {
        AIClient::Ollama(OllamaBackend::new(host, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            AIClient::Ollama(b) => AIClient::Ollama(b.with_model(model)),
            AIClient::Mock(b) => AIClient::Mock(b.clone()),
        }
    }
}

#[async_trait]
impl AIBackend for AIClient {
    async fn extract_expense(&self, text: &str) -> Result<ExtractedExpense, ExtractionError> {
        match self {
            AIClient::Ollama(b) => b.extract_expense(text).await,
            AIClient::Mock(b) => b.extract_expense(text).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
