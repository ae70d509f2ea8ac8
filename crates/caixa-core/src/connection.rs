//! Messaging transport connection state
//!
//! A single `ConnectionController` owns the authentication challenge, the
//! connected flag and the reconnect counter. State only changes through
//! lifecycle events; everything else reads a `ConnectionStatus` snapshot.
//!
//! Reconnects back off linearly (`attempt × 5s`) and stop after five
//! attempts. The counter is not reset when the transport comes back, so the
//! budget is five reconnects per process lifetime.

use std::sync::RwLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Maximum automatic reconnect attempts
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// Delay added per attempt
pub const RECONNECT_STEP: Duration = Duration::from_secs(5);

/// Lifecycle events emitted by the messaging transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// New authentication challenge (QR payload or image data URL)
    Qr { code: String },
    Loading {
        #[serde(default)]
        percent: u8,
        #[serde(default)]
        message: String,
    },
    Authenticated,
    AuthFailure {
        #[serde(default)]
        message: String,
    },
    Ready,
    Disconnected {
        #[serde(default)]
        reason: String,
    },
}

impl LifecycleEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qr { .. } => "qr",
            Self::Loading { .. } => "loading",
            Self::Authenticated => "authenticated",
            Self::AuthFailure { .. } => "auth_failure",
            Self::Ready => "ready",
            Self::Disconnected { .. } => "disconnected",
        }
    }
}

/// Read-only view for the status surface
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    /// Current authentication challenge, if one is pending
    pub challenge: Option<String>,
    pub reconnect_attempts: u32,
    /// True once no further automatic reconnect will happen
    pub reconnects_exhausted: bool,
}

#[derive(Debug, Default)]
struct ConnectionState {
    connected: bool,
    challenge: Option<String>,
    reconnect_attempts: u32,
}

/// Delay before reconnect attempt number `attempt` (1-based)
pub fn reconnect_delay(attempt: u32) -> Duration {
    RECONNECT_STEP * attempt
}

#[derive(Debug, Default)]
pub struct ConnectionController {
    state: RwLock<ConnectionState>,
}

impl ConnectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a lifecycle event
    ///
    /// Returns the delay after which the transport should be reinitialized,
    /// when the event is a disconnect and the reconnect budget allows it.
    pub fn handle(&self, event: &LifecycleEvent) -> Option<Duration> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

        match event {
            LifecycleEvent::Qr { code } => {
                info!("Authentication challenge received");
                state.challenge = Some(code.clone());
                state.connected = false;
                None
            }
            LifecycleEvent::Loading { percent, message } => {
                info!(percent = *percent, message = %message, "Transport loading");
                None
            }
            LifecycleEvent::Authenticated => {
                info!("Transport authenticated");
                None
            }
            LifecycleEvent::AuthFailure { message } => {
                error!(message = %message, "Transport authentication failure");
                None
            }
            LifecycleEvent::Ready => {
                info!("Transport is ready");
                state.connected = true;
                state.challenge = None;
                None
            }
            LifecycleEvent::Disconnected { reason } => {
                warn!(reason = %reason, "Transport disconnected");
                state.connected = false;

                if state.reconnect_attempts >= MAX_RECONNECT_ATTEMPTS {
                    error!(
                        "Reconnect attempts exhausted ({}), manual intervention required",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return None;
                }

                state.reconnect_attempts += 1;
                let delay = reconnect_delay(state.reconnect_attempts);
                info!(
                    "Reconnect attempt {}/{} in {}s",
                    state.reconnect_attempts,
                    MAX_RECONNECT_ATTEMPTS,
                    delay.as_secs()
                );
                Some(delay)
            }
        }
    }

    /// Snapshot of the current state
    pub fn status(&self) -> ConnectionStatus {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        ConnectionStatus {
            connected: state.connected,
            challenge: state.challenge.clone(),
            reconnect_attempts: state.reconnect_attempts,
            reconnects_exhausted: state.reconnect_attempts >= MAX_RECONNECT_ATTEMPTS,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status().connected
    }

    pub fn current_challenge(&self) -> Option<String> {
        self.status().challenge
    }
}
