use crate::content::ContentKind;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Invalid threshold input: {0}")]
    InvalidThreshold(String),

    #[error("{kind} {id} not found")]
    ContentNotFound { kind: ContentKind, id: i64 },

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl DomainError {
    pub fn is_persistence(&self) -> bool {
        matches!(self, DomainError::Persistence(_) | DomainError::ContentNotFound { .. })
    }
}
