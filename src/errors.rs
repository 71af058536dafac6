use thiserror::Error;
use uuid::Uuid;

/// Unified error type for domain, ledger, and storage layers.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("User not found: {0}")]
    UserNotFound(Uuid),
    #[error("Group not found: {0}")]
    GroupNotFound(Uuid),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, SplitError>;

impl From<std::io::Error> for SplitError {
    fn from(err: std::io::Error) -> Self {
        SplitError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SplitError {
    fn from(err: serde_json::Error) -> Self {
        SplitError::Storage(err.to_string())
    }
}
