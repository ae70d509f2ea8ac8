//! Caixa Core Library
//!
//! Shared functionality for the Caixa expense-tracking chat bot:
//! - Message routing and the numeric-prefix expense classifier
//! - Expense extraction through a pluggable local AI backend (Ollama)
//! - Encrypted SQLite expense store
//! - Monthly report aggregation and rendering
//! - Reply templates (Brazilian Portuguese)
//! - Transport connection lifecycle and reconnect policy

pub mod ai;
pub mod bot;
pub mod classifier;
pub mod connection;
pub mod db;
pub mod error;
pub mod models;
pub mod reply;
pub mod report;
pub mod router;
pub mod transport;

/// Test utilities including mock Ollama server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIBackend, AIClient, MockBackend, OllamaBackend};
pub use bot::Bot;
pub use connection::{ConnectionController, ConnectionStatus, LifecycleEvent};
pub use db::Database;
pub use error::{Error, ExtractionError, Result};
pub use models::{Category, Expense, ExtractedExpense, InboundMessage, NewExpense};
pub use reply::Reply;
pub use report::{generate_monthly_report, MonthlyReport};
pub use router::{route, Intent};
pub use transport::Transport;
