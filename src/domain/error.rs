use thiserror::Error;

use crate::domain::workflow::WorkflowError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("`{field}` must not be empty")]
    MissingField { field: &'static str },
    #[error("unknown category `{value}`")]
    UnknownCategory { value: String },
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl DomainError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn unknown_category(value: impl Into<String>) -> Self {
        Self::UnknownCategory {
            value: value.into(),
        }
    }
}
