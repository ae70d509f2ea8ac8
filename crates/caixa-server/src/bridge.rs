//! Transport bridge and delayed reconnects
//!
//! The chat network session lives in an external bridge process. After a
//! disconnect the server waits the delay chosen by `ConnectionController`
//! and asks the bridge to start a new session:
//!
//! - `CAIXA_BRIDGE_URL`: Base URL of the bridge (e.g. "http://localhost:3001")
//!
//! A failed reinitialize is logged and not retried; the next `disconnected`
//! event from the bridge drives the next attempt.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::task::JoinHandle;
use tracing::{error, info};

use caixa_core::{Error, Result, Transport};

/// Environment variable naming the bridge base URL
pub const BRIDGE_URL_ENV: &str = "CAIXA_BRIDGE_URL";

/// HTTP bridge to the messaging transport
#[derive(Clone)]
pub struct WebhookBridge {
    http_client: Client,
    base_url: String,
}

impl WebhookBridge {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns None if `CAIXA_BRIDGE_URL` is not set
    pub fn from_env() -> Option<Self> {
        std::env::var(BRIDGE_URL_ENV)
            .ok()
            .filter(|u| !u.trim().is_empty())
            .map(|u| Self::new(&u))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for WebhookBridge {
    async fn initialize(&self) -> Result<()> {
        let response = self
            .http_client
            .post(format!("{}/initialize", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "HTTP {} from {}",
                response.status(),
                self.base_url
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}

/// Reinitialize `transport` after `delay` in a background task
pub fn schedule_reconnect(transport: Arc<dyn Transport>, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        info!("Reinitializing transport {}", transport.name());
        match transport.initialize().await {
            Ok(()) => info!("Transport reinitialize requested"),
            Err(e) => error!(error = %e, "Failed to reinitialize transport"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, routing::post, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn start_bridge(status: StatusCode) -> (String, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));

        let app = Router::new()
            .route(
                "/initialize",
                post(
                    move |State(calls): State<Arc<AtomicUsize>>| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        status
                    },
                ),
            )
            .with_state(calls.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), calls)
    }

    #[tokio::test]
    async fn test_bridge_initialize() {
        let (url, calls) = start_bridge(StatusCode::OK).await;
        let bridge = WebhookBridge::new(&format!("{}/", url));
        assert_eq!(bridge.base_url(), url);

        bridge.initialize().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bridge_initialize_error_status() {
        let (url, _calls) = start_bridge(StatusCode::SERVICE_UNAVAILABLE).await;
        let bridge = WebhookBridge::new(&url);

        let err = bridge.initialize().await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_schedule_reconnect_calls_bridge_once() {
        let (url, calls) = start_bridge(StatusCode::OK).await;
        let transport: Arc<dyn Transport> = Arc::new(WebhookBridge::new(&url));

        schedule_reconnect(transport, Duration::from_millis(10))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_schedule_reconnect_survives_failure() {
        let transport: Arc<dyn Transport> = Arc::new(WebhookBridge::new("http://127.0.0.1:9"));

        // Failure is logged, the task still completes
        schedule_reconnect(transport, Duration::from_millis(1))
            .await
            .unwrap();
    }
}
