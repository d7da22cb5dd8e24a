//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid prompt template {tool_type}/{variant}: {reason}")]
    InvalidTemplate {
        tool_type: String,
        variant: String,
        reason: String,
    },

    #[error("Invalid model name: {0}")]
    InvalidModel(String),
}

impl DomainError {
    pub fn invalid_template(
        tool_type: impl Into<String>,
        variant: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DomainError::InvalidTemplate {
            tool_type: tool_type.into(),
            variant: variant.into(),
            reason: reason.into(),
        }
    }
}
