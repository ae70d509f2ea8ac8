//! Error types for Caixa

use thiserror::Error;

/// Why an expense message could not be turned into a record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("No JSON found in model response")]
    NoJsonFound,

    #[error("Malformed JSON in model response: {0}")]
    MalformedJson(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Inference service unavailable: {0}")]
    InferenceUnavailable(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// True for failures of the storage collaborator
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Database(_) | Error::Pool(_) | Error::Encryption(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
