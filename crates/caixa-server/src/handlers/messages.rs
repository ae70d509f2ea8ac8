//! Inbound chat message handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use crate::AppState;
use caixa_core::{route, InboundMessage};

/// Reply for the bridge to send back to the originating chat
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub intent: &'static str,
    /// None when the bot stays silent
    pub reply: Option<String>,
}

/// POST /api/messages - Run one inbound message through the bot
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(message): Json<InboundMessage>,
) -> Json<MessageResponse> {
    let intent = route(&message);
    debug!(intent = %intent, "Inbound message");

    let reply = state.bot.handle(&message).await;

    Json(MessageResponse {
        intent: intent.as_str(),
        reply,
    })
}
