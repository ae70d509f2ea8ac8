//! JSON parsing helpers for AI backend responses
//!
//! Models often wrap the requested JSON in prose ("Claro! Aqui está: {...}").
//! These helpers locate the first JSON object, parse it, and validate the
//! expense fields. This is the only place where a category label is turned
//! into a `Category`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ExtractionError;
use crate::models::{Category, ExtractedExpense};

/// Longest slice of model output quoted in error messages
const MAX_ERROR_EXCERPT: usize = 200;

fn excerpt(s: &str) -> String {
    if s.chars().count() > MAX_ERROR_EXCERPT {
        format!("{}...", s.chars().take(MAX_ERROR_EXCERPT).collect::<String>())
    } else {
        s.to_string()
    }
}

/// Locate the first balanced `{...}` block in a response
///
/// Braces inside JSON strings do not count toward nesting, so a description
/// like `"conta {casa}"` does not end the object early.
pub fn find_json_object(response: &str) -> Result<&str, ExtractionError> {
    let start = response.find('{').ok_or(ExtractionError::NoJsonFound)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in response[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&response[start..=start + i]);
                }
            }
            _ => {}
        }
    }

    Err(ExtractionError::MalformedJson(format!(
        "unbalanced braces | Raw: {}",
        excerpt(&response[start..])
    )))
}

/// Expense fields as the model returns them, before validation
///
/// The prompt asks for Portuguese keys; English keys are accepted too.
#[derive(Debug, Deserialize)]
struct RawExpense {
    #[serde(default, alias = "amount")]
    valor: Option<Value>,
    #[serde(default, alias = "category")]
    categoria: Option<Value>,
    #[serde(default, alias = "description")]
    descricao: Option<Value>,
}

fn parse_amount(value: Option<&Value>) -> Result<f64, ExtractionError> {
    let amount = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };

    match amount {
        Some(a) if a.is_finite() && a > 0.0 => Ok(a),
        Some(a) => Err(ExtractionError::InvalidAmount(format!(
            "amount must be positive, got {}",
            a
        ))),
        None => Err(ExtractionError::InvalidAmount(format!(
            "not a number: {}",
            value.map(|v| v.to_string()).unwrap_or_else(|| "missing".into())
        ))),
    }
}

/// Parse and validate an expense from a model response
///
/// `original_text` is the user's message, used when the model leaves the
/// description out.
pub fn parse_expense(
    response: &str,
    original_text: &str,
) -> Result<ExtractedExpense, ExtractionError> {
    let json_str = find_json_object(response.trim())?;

    let raw: RawExpense = serde_json::from_str(json_str).map_err(|e| {
        ExtractionError::MalformedJson(format!("{} | Raw: {}", e, excerpt(json_str)))
    })?;

    let amount = parse_amount(raw.valor.as_ref())?;

    let category = Category::from_label_or_other(raw.categoria.as_ref().and_then(Value::as_str));

    let description = raw
        .descricao
        .as_ref()
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| original_text.trim())
        .to_string();

    Ok(ExtractedExpense {
        amount,
        category,
        description,
    })
}
