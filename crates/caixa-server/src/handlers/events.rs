//! Transport lifecycle event handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, warn};

use crate::qr::terminal_qr;
use crate::{schedule_reconnect, AppState};
use caixa_core::{ConnectionStatus, LifecycleEvent};

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub event: &'static str,
    pub status: ConnectionStatus,
    /// Seconds until the scheduled reconnect, if one was scheduled
    pub reconnect_in_secs: Option<u64>,
}

/// POST /api/events - Apply a lifecycle event from the bridge
pub async fn post_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<LifecycleEvent>,
) -> Json<EventResponse> {
    let delay = state.connection.handle(&event);

    if let LifecycleEvent::Qr { code } = &event {
        if let Some(art) = terminal_qr(code) {
            info!("Scan this QR code with WhatsApp:\n{}", art);
        }
    }

    if let Some(delay) = delay {
        match &state.transport {
            Some(transport) => {
                schedule_reconnect(transport.clone(), delay);
            }
            None => warn!("Reconnect due but no transport bridge is configured"),
        }
    }

    Json(EventResponse {
        event: event.as_str(),
        status: state.connection.status(),
        reconnect_in_secs: delay.map(|d| d.as_secs()),
    })
}
