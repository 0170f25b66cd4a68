use thiserror::Error;

use crate::types::FieldRole;

#[derive(Error, Debug)]
pub enum DrError {
    #[error("Field not found: {role}")]
    FieldNotFound { role: FieldRole },
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
    #[error("Invalid URL pattern: {0}")]
    InvalidPattern(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrError {
    pub fn field_not_found(role: FieldRole) -> Self {
        Self::FieldNotFound { role }
    }

    /// Whether the error is the soft "target not on this page" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FieldNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DrError>;
