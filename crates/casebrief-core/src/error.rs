//! Error types for casebrief.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Input artifact (case file, config file, catalog file) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Sentence set is empty or too small to rank.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// User-supplied policy parameter is out of its valid range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Matrix computation produced an unusable result.
    #[error("Numeric error: {0}")]
    Numeric(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether a batch run should treat this as a skippable missing case.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
