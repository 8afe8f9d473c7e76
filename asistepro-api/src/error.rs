use thiserror::Error;

/// Distinguishes store failures an operator must fix (policies, missing tables)
/// from failures a plain retry may resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Transient,
    Rejected,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Configuration => write!(f, "configuration"),
            FailureKind::Transient => write!(f, "transient"),
            FailureKind::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Persistence error ({kind}): {message}")]
    PersistenceError { kind: FailureKind, message: String },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    pub fn is_configuration_problem(&self) -> bool {
        matches!(
            self,
            ApiError::PersistenceError {
                kind: FailureKind::Configuration,
                ..
            }
        )
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
