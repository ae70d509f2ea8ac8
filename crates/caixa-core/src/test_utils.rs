//! Test utilities for caixa-core
//!
//! A mock Ollama server speaking the two endpoints the bot uses, so the real
//! `OllamaBackend` HTTP path can be exercised without a model.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::ai::mock_model_output;

const TEXT_MARKER: &str = "Analise este gasto: \"";

/// How the mock answers `/api/generate`
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Keyword-based JSON built from the quoted user text
    Keywords,
    /// Always return this model output
    Fixed(String),
    /// Always answer 500
    Failing,
}

#[derive(Debug)]
struct MockState {
    mode: MockMode,
    generate_calls: AtomicUsize,
}

/// Mock Ollama server for testing and development
pub struct MockOllamaServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockOllamaServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        Self::start_with(MockMode::Keywords).await
    }

    /// Start a server that always returns `response` as the model output
    pub async fn with_response(response: impl Into<String>) -> Self {
        Self::start_with(MockMode::Fixed(response.into())).await
    }

    /// Start a server whose generate endpoint always fails
    pub async fn failing() -> Self {
        Self::start_with(MockMode::Failing).await
    }

    pub async fn start_with(mode: MockMode) -> Self {
        let state = Arc::new(MockState {
            mode,
            generate_calls: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/api/tags", get(handle_tags))
            .route("/api/generate", post(handle_generate))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of generate requests served so far
    pub fn generate_calls(&self) -> usize {
        self.state.generate_calls.load(Ordering::SeqCst)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockOllamaServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Ollama tags endpoint response (health check)
async fn handle_tags() -> Json<TagsResponse> {
    Json(TagsResponse {
        models: vec![ModelInfo {
            name: "mistral:latest".to_string(),
            modified_at: "2024-01-01T00:00:00Z".to_string(),
            size: 4_100_000_000,
        }],
    })
}

/// Ollama generate endpoint
async fn handle_generate(
    State(state): State<Arc<MockState>>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    state.generate_calls.fetch_add(1, Ordering::SeqCst);

    let response = match &state.mode {
        MockMode::Failing => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response();
        }
        MockMode::Fixed(r) => r.clone(),
        MockMode::Keywords => {
            // Models like to chat around the JSON
            format!(
                "Claro! Aqui está:\n{}",
                mock_model_output(&extract_text_from_prompt(&request.prompt))
            )
        }
    };

    Json(GenerateResponse {
        model: request.model,
        response,
        done: true,
    })
    .into_response()
}

/// Pull the quoted user message back out of the extraction prompt
fn extract_text_from_prompt(prompt: &str) -> String {
    if let Some(start) = prompt.find(TEXT_MARKER) {
        let after_start = &prompt[start + TEXT_MARKER.len()..];
        if let Some(end) = after_start.find('"') {
            return after_start[..end].to_string();
        }
    }
    prompt.to_string()
}

// Request/Response types for the mock server

#[derive(Debug, Serialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    name: String,
    modified_at: String,
    size: u64,
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[allow(dead_code)]
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    model: String,
    response: String,
    done: bool,
}
