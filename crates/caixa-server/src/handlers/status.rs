//! Status page and health handlers

use std::sync::Arc;

use axum::{extract::State, response::Html, Json};
use serde::Serialize;

use crate::qr::challenge_image_src;
use crate::{AppError, AppState};
use caixa_core::{AIBackend, ConnectionStatus};

/// GET /health - Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub connection: ConnectionStatus,
    pub ai_host: String,
    pub ai_model: String,
    pub expense_count: i64,
}

/// GET /api/status - Connection snapshot and store summary
pub async fn api_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, AppError> {
    let ai = state.bot.ai();
    Ok(Json(StatusResponse {
        connection: state.connection.status(),
        ai_host: ai.host().to_string(),
        ai_model: ai.model().to_string(),
        expense_count: state.bot.db().count_expenses()?,
    }))
}

/// GET / - Human-readable connection page
pub async fn status_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_status_page(&state.connection.status()))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn render_status_page(status: &ConnectionStatus) -> String {
    let state_label = if status.connected {
        "Conectado"
    } else {
        "Aguardando conexão"
    };

    let challenge = match status.challenge.as_deref() {
        Some(code) => match challenge_image_src(code) {
            Some(src) => format!(
                "<p>Escaneie o QR code com o WhatsApp:</p>\n<img src=\"{}\" alt=\"QR Code\">",
                escape_html(&src)
            ),
            // Too long for a QR code
            None => format!(
                "<p>Escaneie o QR code com o WhatsApp:</p>\n<pre>{}</pre>",
                escape_html(code)
            ),
        },
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="5">
<title>Caixa</title>
<style>body {{ font-family: sans-serif; text-align: center; margin-top: 3em; }}</style>
</head>
<body>
<h1>Caixa</h1>
<p>Status: <strong>{}</strong></p>
{}
</body>
</html>
"#,
        state_label, challenge
    )
}
