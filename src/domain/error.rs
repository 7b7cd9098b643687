use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    NotFound(String),
    ValidationError(String),
    // Input is syntactically unusable: no header plus at least one data row.
    FormatError(String),
    // Input parsed cleanly but produced no recognized rows at all.
    EmptyImport(String),
    DatabaseError(String),
    IoError(String),
}

impl AppError {
    pub fn format_error() -> Self {
        AppError::FormatError("CSV must have at least a header and one data row".to_string())
    }

    pub fn empty_import() -> Self {
        AppError::EmptyImport("no valid data found".to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            // These two carry stable user-facing text; display as-is.
            AppError::FormatError(msg) => write!(f, "{}", msg),
            AppError::EmptyImport(msg) => write!(f, "{}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
