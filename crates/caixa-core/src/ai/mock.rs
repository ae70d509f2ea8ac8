//! Mock backend for testing
//!
//! Produces model-like output from keywords so the full parsing and
//! validation path runs without an LLM server.

use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::models::{Category, ExtractedExpense};

use super::parsing::parse_expense;
use super::AIBackend;

/// Keyword → category table used by the mock
const KEYWORDS: &[(&str, Category)] = &[
    ("farmacia", Category::Health),
    ("farmácia", Category::Health),
    ("remedio", Category::Health),
    ("médico", Category::Health),
    ("uber", Category::Transport),
    ("gasolina", Category::Transport),
    ("onibus", Category::Transport),
    ("mercado", Category::Food),
    ("almoço", Category::Food),
    ("almoco", Category::Food),
    ("lanche", Category::Food),
    ("aluguel", Category::Housing),
    ("luz", Category::Housing),
    ("cinema", Category::Leisure),
    ("show", Category::Leisure),
    ("curso", Category::Education),
    ("livro", Category::Education),
];

/// Build the JSON a well-behaved model would return for `text`
pub(crate) fn mock_model_output(text: &str) -> String {
    let mut words = text.split_whitespace();
    let amount = words.next().unwrap_or("0");
    let description = words.collect::<Vec<_>>().join(" ");
    let lowered = description.to_lowercase();

    let category = KEYWORDS
        .iter()
        .find(|(k, _)| lowered.contains(k))
        .map(|(_, c)| *c)
        .unwrap_or(Category::Other);

    serde_json::json!({
        "valor": amount,
        "categoria": category.as_str(),
        "descricao": description,
    })
    .to_string()
}

/// Mock AI backend for testing
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether the backend answers at all
    pub healthy: bool,
    /// Fixed model output; keyword mock when None
    pub response: Option<String>,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            response: None,
        }
    }

    /// A backend whose inference calls always fail
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            response: None,
        }
    }

    /// A backend that always returns `response` as the model output
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            healthy: true,
            response: Some(response.into()),
        }
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn extract_expense(&self, text: &str) -> Result<ExtractedExpense, ExtractionError> {
        if !self.healthy {
            return Err(ExtractionError::InferenceUnavailable(
                "mock backend is unhealthy".into(),
            ));
        }

        let raw = match &self.response {
            Some(r) => r.clone(),
            None => mock_model_output(text),
        };
        parse_expense(&raw, text)
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_keyword_categories() {
        let mock = MockBackend::new();
        let result = mock.extract_expense("12.90 uber pro trabalho").await.unwrap();
        assert_eq!(result.amount, 12.9);
        assert_eq!(result.category, Category::Transport);
        assert_eq!(result.description, "uber pro trabalho");

        let result = mock.extract_expense("30 presente").await.unwrap();
        assert_eq!(result.category, Category::Other);
    }

    #[tokio::test]
    async fn test_mock_fixed_response() {
        let mock = MockBackend::with_response("sem json aqui");
        let err = mock.extract_expense("50 farmacia").await.unwrap_err();
        assert_eq!(err, ExtractionError::NoJsonFound);
    }

    #[tokio::test]
    async fn test_mock_unhealthy() {
        let mock = MockBackend::unhealthy();
        assert!(!mock.health_check().await);
        let err = mock.extract_expense("50 farmacia").await.unwrap_err();
        assert!(matches!(err, ExtractionError::InferenceUnavailable(_)));
    }
}
