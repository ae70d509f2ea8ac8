//! Per-message pipeline
//!
//! route → (report | extract → persist) → reply. Each message is handled on
//! its own; nothing is shared between calls except the database pool and the
//! AI client. Any failure short-circuits the chain and becomes exactly one
//! apology reply.

use tracing::{debug, error, info, warn};

use crate::ai::{AIBackend, AIClient};
use crate::db::Database;
use crate::error::Result;
use crate::models::{Expense, InboundMessage};
use crate::reply::Reply;
use crate::report::generate_monthly_report;
use crate::router::{route, Intent};

pub struct Bot<B: AIBackend = AIClient> {
    db: Database,
    ai: B,
}

impl<B: AIBackend> Bot<B> {
    pub fn new(db: Database, ai: B) -> Self {
        Self { db, ai }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn ai(&self) -> &B {
        &self.ai
    }

    /// Handle a message and return the reply text, if any
    pub async fn handle(&self, message: &InboundMessage) -> Option<String> {
        self.respond(message).await.map(|reply| reply.text())
    }

    /// Handle a message and return the reply, if any
    pub async fn respond(&self, message: &InboundMessage) -> Option<Reply> {
        let intent = route(message);

        match intent {
            Intent::Ignore => None,
            Intent::Unrecognized => {
                debug!(body = %message.body, "No action for message");
                None
            }
            Intent::Ping => Some(Reply::Pong),
            Intent::Report => {
                info!("Generating monthly report");
                match generate_monthly_report(&self.db) {
                    Ok(report) => Some(Reply::Report(report)),
                    Err(e) => {
                        error!(error = %e, "Failed to generate report");
                        Some(Reply::UnexpectedFailure)
                    }
                }
            }
            Intent::Expense => {
                info!(body = %message.body, "Processing possible expense");
                match self.record_expense(&message.body).await {
                    Ok(expense) => Some(Reply::ExpenseRecorded(expense)),
                    Err(e) => {
                        warn!(error = %e, body = %message.body, "Failed to record expense");
                        Some(Reply::from_error(&e))
                    }
                }
            }
        }
    }

    /// Extract and persist one expense
    pub async fn record_expense(&self, text: &str) -> Result<Expense> {
        let extracted = self.ai.extract_expense(text).await?;
        let expense = self.db.insert_expense(&extracted.into())?;

        info!(
            id = expense.id,
            amount = expense.amount,
            category = %expense.category,
            "Expense recorded"
        );
        Ok(expense)
    }
}
