//! Message routing
//!
//! Picks exactly one intent per inbound message. Report and expense checks
//! look at the normalized text; the health command must match exactly. The
//! original body is what gets extracted.

use crate::classifier::{looks_like_expense, normalize};
use crate::models::InboundMessage;

/// Substrings that request the monthly report
pub const REPORT_TRIGGERS: &[&str] = &["gastos do mês", "relatório", "relatorio"];

/// Exact text that also requests the report
pub const REPORT_EXACT: &str = "gastos";

/// Health command, matched against the raw body
pub const PING_COMMAND: &str = "!teste";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Authored by the bot itself; never answered
    Ignore,
    Report,
    Ping,
    Expense,
    /// Nothing to do for this text
    Unrecognized,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Report => "report",
            Self::Ping => "ping",
            Self::Expense => "expense",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn is_report_request(text: &str) -> bool {
    text == REPORT_EXACT || REPORT_TRIGGERS.iter().any(|t| text.contains(t))
}

/// Decide what to do with a message
pub fn route(message: &InboundMessage) -> Intent {
    if message.from_me {
        return Intent::Ignore;
    }

    let text = normalize(&message.body);

    if is_report_request(&text) {
        Intent::Report
    } else if message.body == PING_COMMAND {
        Intent::Ping
    } else if looks_like_expense(&text) {
        Intent::Expense
    } else {
        Intent::Unrecognized
    }
}
