//! Caixa Web Server
//!
//! Axum-based HTTP surface for the Caixa chat bot. The messaging transport
//! runs as a separate bridge process that forwards inbound messages and
//! lifecycle events here and relays the replies back to the chat.
//!
//! Security features:
//! - Bearer API keys on `/api/*` (secure by default, use --no-auth for local dev)
//! - Security headers on every response
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use caixa_core::ai::{AIBackend, AIClient};
use caixa_core::{Bot, ConnectionController, Database, Transport};

mod bridge;
mod handlers;
mod qr;

pub use bridge::{schedule_reconnect, WebhookBridge, BRIDGE_URL_ENV};

/// Environment variable holding comma-separated API keys
pub const API_KEYS_ENV: &str = "CAIXA_API_KEYS";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// API keys accepted as "Bearer <key>" in the Authorization header
    pub api_keys: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            api_keys: vec![],
        }
    }
}

impl ServerConfig {
    /// Build from `CAIXA_API_KEYS`
    pub fn from_env(require_auth: bool) -> Self {
        let api_keys = std::env::var(API_KEYS_ENV)
            .map(|s| parse_api_keys(&s))
            .unwrap_or_default();
        Self {
            require_auth,
            api_keys,
        }
    }
}

/// Split a comma-separated key list, dropping blanks
pub fn parse_api_keys(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
pub struct AppState {
    pub bot: Bot,
    pub config: ServerConfig,
    pub connection: ConnectionController,
    /// Transport to reinitialize after a disconnect (None = reconnects are only logged)
    pub transport: Option<Arc<dyn Transport>>,
}

/// Authentication middleware for the bridge-facing API
///
/// API keys are compared in constant time.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(key) if validate_api_key(key, &state.config.api_keys) => next.run(request).await,
        Some(_) => {
            warn!(path = %request.uri().path(), "Invalid API key");
            AppError::unauthorized("Invalid API key").into_response()
        }
        None => {
            warn!(path = %request.uri().path(), "Missing API key");
            AppError::unauthorized("Authentication required").into_response()
        }
    }
}

/// Validate an API key against the configured keys using constant-time comparison
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    for key in valid_keys {
        let key_bytes = key.as_bytes();
        // Only compare if lengths match (constant-time for same-length keys)
        if provided_bytes.len() == key_bytes.len() && provided_bytes.ct_eq(key_bytes).into() {
            return true;
        }
    }
    false
}

/// Create the application router
///
/// Reconnects go through the bridge named by `CAIXA_BRIDGE_URL`, if set.
pub fn create_router(db: Database, ai: AIClient, config: ServerConfig) -> Router {
    let transport = WebhookBridge::from_env().map(|b| Arc::new(b) as Arc<dyn Transport>);
    create_router_with_transport(db, ai, config, transport)
}

/// Create the application router with an explicit transport (for testing)
pub fn create_router_with_transport(
    db: Database,
    ai: AIClient,
    config: ServerConfig,
    transport: Option<Arc<dyn Transport>>,
) -> Router {
    info!("AI backend configured: {} (model: {})", ai.host(), ai.model());
    match &transport {
        Some(t) => info!("Reconnects go through {}", t.name()),
        None => info!(
            "ℹ️  No transport bridge configured (set {} to enable reconnects)",
            BRIDGE_URL_ENV
        ),
    }

    let state = Arc::new(AppState {
        bot: Bot::new(db, ai),
        config,
        connection: ConnectionController::new(),
        transport,
    });

    let api_routes = Router::new()
        .route("/status", get(handlers::api_status))
        .route("/messages", post(handlers::post_message))
        .route("/events", post(handlers::post_event))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // The status page embeds the challenge as a data: image
    let csp_value = HeaderValue::from_static(
        "default-src 'none'; img-src data:; style-src 'unsafe-inline'; frame-ancestors 'none'",
    );

    Router::new()
        .route("/", get(handlers::status_page))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ))
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    ai: AIClient,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    } else if config.api_keys.is_empty() {
        warn!(
            "⚠️  No API keys configured ({}); every /api request will be rejected",
            API_KEYS_ENV
        );
    }

    check_ai_connection(&ai).await;

    let app = create_router(db, ai, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
pub async fn check_ai_connection(ai: &AIClient) -> bool {
    let healthy = ai.health_check().await;
    if healthy {
        info!("✅ AI backend connected: {} (model: {})", ai.host(), ai.model());
    } else {
        warn!(
            "⚠️  AI backend not responding: {} (model: {}); expense messages will fail",
            ai.host(),
            ai.model()
        );
    }
    healthy
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
