//! Claims domain errors

use thiserror::Error;

use core_kernel::{CoreError, PeriodError, PortError};

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Store error: {0}")]
    Store(#[source] PortError),
}

/// Coarse classification of a [`ClaimError`], for callers that surface errors to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimErrorKind {
    NotFound,
    InvalidArgument,
    ValidationFailed,
    Internal,
}

impl ClaimError {
    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        ClaimError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ClaimError::InvalidArgument(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::ValidationFailed(message.into())
    }

    pub fn kind(&self) -> ClaimErrorKind {
        match self {
            ClaimError::NotFound { .. } => ClaimErrorKind::NotFound,
            ClaimError::InvalidArgument(_) => ClaimErrorKind::InvalidArgument,
            ClaimError::ValidationFailed(_) => ClaimErrorKind::ValidationFailed,
            ClaimError::Store(_) => ClaimErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ClaimErrorKind::NotFound
    }
}

impl From<PortError> for ClaimError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => ClaimError::NotFound {
                entity: entity_type,
                id,
            },
            PortError::Validation { message, field: Some(field) } => {
                ClaimError::ValidationFailed(format!("{field}: {message}"))
            }
            PortError::Validation { message, field: None } => ClaimError::ValidationFailed(message),
            other => ClaimError::Store(other),
        }
    }
}

impl From<PeriodError> for ClaimError {
    fn from(err: PeriodError) -> Self {
        ClaimError::ValidationFailed(err.to_string())
    }
}

impl From<CoreError> for ClaimError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Period(period) => period.into(),
            CoreError::Validation(message) => ClaimError::ValidationFailed(message),
            CoreError::Configuration(message) => ClaimError::Store(PortError::internal(message)),
        }
    }
}

impl From<validator::ValidationErrors> for ClaimError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClaimError::ValidationFailed(errors.to_string())
    }
}
