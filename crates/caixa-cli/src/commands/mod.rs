//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, report) and shared utilities (open_db)
//! - `chat` - Console transport (chat, send)
//! - `ollama` - Ollama connection test
//! - `serve` - Webhook server command

pub mod chat;
pub mod core;
pub mod ollama;
pub mod serve;

// Re-export command functions for main.rs
pub use chat::*;
pub use core::*;
pub use ollama::*;
pub use serve::*;
