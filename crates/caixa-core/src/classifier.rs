//! Cheap expense pre-filter
//!
//! Decides whether a message is worth sending to the (expensive) extraction
//! step. The rule is narrow: the text must start with a number
//! (`50`, `12.90`) followed by whitespace. "farmacia 50" is not recognized.

use std::sync::OnceLock;

use regex::Regex;

fn numeric_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]+)?\s").expect("valid regex"))
}

/// Trim and lowercase text for routing decisions
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// True if the text begins with a numeric token followed by whitespace
pub fn looks_like_expense(text: &str) -> bool {
    numeric_prefix().is_match(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_then_words() {
        assert!(looks_like_expense("50 farmacia"));
        assert!(looks_like_expense("12.90 almoço no centro"));
        assert!(looks_like_expense("  7 uber  "));
        assert!(looks_like_expense("100\tmercado"));
    }

    #[test]
    fn test_rejects_text_without_numeric_prefix() {
        assert!(!looks_like_expense("farmacia 50"));
        assert!(!looks_like_expense("oi, tudo bem?"));
        assert!(!looks_like_expense(""));
        assert!(!looks_like_expense("R$ 50 farmacia"));
    }

    #[test]
    fn test_number_must_be_followed_by_whitespace() {
        assert!(!looks_like_expense("50"));
        assert!(!looks_like_expense("50farmacia"));
        assert!(!looks_like_expense("50,00 farmacia"));
        assert!(!looks_like_expense("50. farmacia"));
        assert!(!looks_like_expense(".5 cafe"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Gastos Do MÊS "), "gastos do mês");
    }
}
