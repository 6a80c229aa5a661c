use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    StorageParse,
    SharingUnavailable,
    Storage,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PledgeError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("stored pledges could not be parsed: {0}")]
    StorageParse(String),
    #[error("sharing unavailable: {0}")]
    SharingUnavailable(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

impl PledgeError {
    pub fn no_commitment_selected() -> Self {
        Self::Validation("no commitment selected".into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PledgeError::Validation(_) => ErrorCode::Validation,
            PledgeError::StorageParse(_) => ErrorCode::StorageParse,
            PledgeError::SharingUnavailable(_) => ErrorCode::SharingUnavailable,
            PledgeError::Storage(_) => ErrorCode::Storage,
        }
    }
}

/// Failure of a single share provider. The chain moves on to the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("{provider} is not available on this platform")]
    Unavailable { provider: String },
    #[error("{provider} rejected the share: {reason}")]
    Rejected { provider: String, reason: String },
}

/// Serializable form of a [`PledgeError`] for machine-readable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&PledgeError> for ErrorReport {
    fn from(value: &PledgeError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}
