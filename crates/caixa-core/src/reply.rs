//! User-facing reply templates
//!
//! Every terminal outcome of a message maps to exactly one of these. All text
//! is Brazilian Portuguese.

use chrono::Local;

use crate::error::Error;
use crate::models::{Category, Expense};
use crate::report::format_amount;

pub const PONG: &str = "Bot funcionando! 👍";

pub const EXTRACTION_FAILED: &str = "Desculpe, não consegui entender o gasto. Por favor, tente novamente com o formato \"valor local\" (exemplo: \"50 farmacia\")";

pub const STORAGE_FAILED: &str =
    "Desculpe, não consegui salvar seu gasto agora. Por favor, envie novamente em instantes.";

pub const UNEXPECTED_FAILURE: &str = "Desculpe, tive um erro ao processar sua solicitação.";

#[derive(Debug, Clone)]
pub enum Reply {
    ExpenseRecorded(Expense),
    Report(String),
    Pong,
    ExtractionFailed,
    StorageFailed,
    UnexpectedFailure,
}

impl Reply {
    /// Pick the apology for a failed message
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Extraction(_) => Reply::ExtractionFailed,
            e if e.is_storage() => Reply::StorageFailed,
            _ => Reply::UnexpectedFailure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExpenseRecorded(_) => "expense_recorded",
            Self::Report(_) => "report",
            Self::Pong => "pong",
            Self::ExtractionFailed => "extraction_failed",
            Self::StorageFailed => "storage_failed",
            Self::UnexpectedFailure => "unexpected_failure",
        }
    }

    /// Render the message text
    pub fn text(&self) -> String {
        match self {
            Self::ExpenseRecorded(expense) => expense_recorded(expense),
            Self::Report(report) => report.clone(),
            Self::Pong => PONG.to_string(),
            Self::ExtractionFailed => EXTRACTION_FAILED.to_string(),
            Self::StorageFailed => STORAGE_FAILED.to_string(),
            Self::UnexpectedFailure => UNEXPECTED_FAILURE.to_string(),
        }
    }
}

fn expense_recorded(expense: &Expense) -> String {
    let date = expense.date.with_timezone(&Local).format("%d/%m/%Y");
    let friendly = Category::from_label(&expense.category)
        .unwrap_or(Category::Other)
        .friendly_message();

    format!(
        "📝 Registro de Transação Concluído\n\
         📄 Descrição: {}\n\
         💰 Valor: {}\n\
         📊 Tipo: Despesa\n\
         ✏️ Categoria: {}\n\
         📅 Data: {}\n\
         💳 Pago: ✅\n\n\
         {}",
        expense.description,
        format_amount(expense.amount),
        expense.category,
        date,
        friendly
    )
}
