//! Extraction prompt
//!
//! The template is embedded at compile time from `prompts/extract_expense.md`
//! and has two placeholders: `{{text}}` and `{{categories}}`.

use crate::models::Category;

const EXTRACT_EXPENSE: &str = include_str!("../../prompts/extract_expense.md");

/// Comma-separated category labels, in offer order
pub fn category_list() -> String {
    Category::all()
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the extraction prompt for a user message
pub fn render_extraction_prompt(text: &str) -> String {
    EXTRACT_EXPENSE
        .replace("{{categories}}", &category_list())
        .replace("{{text}}", text)
}
