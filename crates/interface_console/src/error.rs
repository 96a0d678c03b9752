//! Console error handling

use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::{ClaimId, CoreError};
use domain_claims::{ClaimError, ClaimErrorKind};

/// Console error types
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Claims(#[from] ClaimError),

    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("Action '{action}' is not offered for claim {claim_id}")]
    ActionNotOffered { action: &'static str, claim_id: ClaimId },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error body handed back to the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<&ClaimError> for ErrorBody {
    fn from(err: &ClaimError) -> Self {
        let kind = match err.kind() {
            ClaimErrorKind::NotFound => "not_found",
            ClaimErrorKind::InvalidArgument => "invalid_argument",
            ClaimErrorKind::ValidationFailed => "validation_error",
            ClaimErrorKind::Internal => "internal_error",
        };
        ErrorBody::new(kind, err.to_string())
    }
}

impl From<&ConsoleError> for ErrorBody {
    fn from(err: &ConsoleError) -> Self {
        match err {
            ConsoleError::Claims(inner) => inner.into(),
            ConsoleError::ActionNotOffered { .. } => ErrorBody::new("action_not_offered", err.to_string()),
            ConsoleError::Config(_) => ErrorBody::new("configuration_error", err.to_string()),
            ConsoleError::Telemetry(_) | ConsoleError::Serialization(_) => {
                ErrorBody::new("internal_error", err.to_string())
            }
        }
    }
}
