//! Messaging transport seam
//!
//! The bot never talks to a chat network directly. Inbound messages arrive
//! through whatever surface hosts it (HTTP bridge, console) and replies go
//! back the same way. The only call the core needs to make outward is asking
//! the transport to start a new session after a disconnect.

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Start (or restart) the transport session
    async fn initialize(&self) -> Result<()>;

    /// Short name for logs
    fn name(&self) -> &str;
}
