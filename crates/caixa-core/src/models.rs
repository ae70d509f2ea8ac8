//! Domain models for Caixa

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spending category
///
/// Closed set with a single catch-all (`Other`). The label is what gets
/// stored and shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Alimentação")]
    Food,
    #[serde(rename = "Transporte")]
    Transport,
    #[serde(rename = "Moradia")]
    Housing,
    #[serde(rename = "Lazer")]
    Leisure,
    #[serde(rename = "Saúde")]
    Health,
    #[serde(rename = "Educação")]
    Education,
    #[serde(rename = "Outros")]
    Other,
}

impl Category {
    /// All categories, in the order they are offered to the model
    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Housing,
            Self::Leisure,
            Self::Health,
            Self::Education,
            Self::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Alimentação",
            Self::Transport => "Transporte",
            Self::Housing => "Moradia",
            Self::Leisure => "Lazer",
            Self::Health => "Saúde",
            Self::Education => "Educação",
            Self::Other => "Outros",
        }
    }

    /// Exact (case-sensitive) label lookup
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.as_str() == label)
    }

    /// Resolve a label coming from model output, falling back to `Other`
    pub fn from_label_or_other(label: Option<&str>) -> Self {
        label.and_then(Self::from_label).unwrap_or(Self::Other)
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Food => "🍔",
            Self::Transport => "🚗",
            Self::Housing => "🏠",
            Self::Leisure => "🎮",
            Self::Health => "💊",
            Self::Education => "📚",
            Self::Other => "📝",
        }
    }

    /// Friendly line appended to the confirmation reply
    pub fn friendly_message(&self) -> &'static str {
        match self {
            Self::Food => "Hummmm, parece que estava gostoso! 😋",
            Self::Transport => "Tá abastecido e pronto para novas aventuras! 🚗💨",
            Self::Housing => "Investindo no seu conforto! 🏠✨",
            Self::Leisure => "Diversão é importante! 🎉",
            Self::Health => "Saúde em primeiro lugar! 💪",
            Self::Education => "Conhecimento é um investimento! 📚",
            Self::Other => "Registro realizado com sucesso! ✅",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated output of the extraction step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedExpense {
    pub amount: f64,
    pub category: Category,
    pub description: String,
}

/// An expense ready to be persisted (timestamp is assigned on insert)
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category: Category,
}

impl From<ExtractedExpense> for NewExpense {
    fn from(e: ExtractedExpense) -> Self {
        Self {
            description: e.description,
            amount: e.amount,
            category: e.category,
        }
    }
}

/// A persisted expense record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    /// Category label as stored
    pub category: String,
    pub date: DateTime<Utc>,
}

/// A message delivered by the messaging transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub body: String,
    /// Set when the bot itself authored the message
    #[serde(default, alias = "fromMe")]
    pub from_me: bool,
}

impl InboundMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            from_me: false,
        }
    }

    pub fn from_self(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            from_me: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::all() {
            assert_eq!(Category::from_label(category.as_str()), Some(*category));
        }
    }

    #[test]
    fn test_category_lookup_is_case_sensitive() {
        assert_eq!(Category::from_label("transporte"), None);
        assert_eq!(Category::from_label("Transport"), None);
        assert_eq!(
            Category::from_label_or_other(Some("transporte")),
            Category::Other
        );
        assert_eq!(Category::from_label_or_other(None), Category::Other);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::Health).unwrap();
        assert_eq!(json, "\"Saúde\"");
    }

    #[test]
    fn test_inbound_message_accepts_camel_case_flag() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"body": "50 farmacia", "fromMe": true}"#).unwrap();
        assert!(msg.from_me);

        let msg: InboundMessage = serde_json::from_str(r#"{"body": "oi"}"#).unwrap();
        assert!(!msg.from_me);
    }
}
