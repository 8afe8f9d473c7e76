use asistepro_api::{ApiError, FailureKind};
use thiserror::Error;

use crate::repository::table::Table;

/// A row read from the store that does not match its typed schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to decode column '{column}': {message}")]
pub struct DecodeError {
    pub column: String,
    pub message: String,
}

impl DecodeError {
    pub fn new(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            message: message.into(),
        }
    }
}

/// Failures surfaced by every store operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No row in '{table}' matches {key}")]
    NotFound { table: Table, key: String },

    #[error("Access policy rejected the operation on '{table}': {message}")]
    PermissionDenied { table: Table, message: String },

    #[error("Table '{table}' does not exist")]
    SchemaMissing { table: Table },

    #[error("Unique constraint violated on '{table}': {message}")]
    Conflict { table: Table, message: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store rejected the operation on '{table}': {message}")]
    Rejected { table: Table, message: String },

    #[error("Malformed row in '{table}': {source}")]
    Decode {
        table: Table,
        #[source]
        source: DecodeError,
    },
}

impl StoreError {
    pub fn not_found(table: Table, key: impl std::fmt::Display) -> Self {
        StoreError::NotFound {
            table,
            key: key.to_string(),
        }
    }

    /// Table the failure happened on, when known.
    pub fn table(&self) -> Option<Table> {
        match self {
            StoreError::NotFound { table, .. }
            | StoreError::PermissionDenied { table, .. }
            | StoreError::SchemaMissing { table }
            | StoreError::Conflict { table, .. }
            | StoreError::Rejected { table, .. }
            | StoreError::Decode { table, .. } => Some(*table),
            StoreError::Unavailable(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Failures an operator must fix in the store itself (policies, schema).
    pub fn is_configuration_problem(&self) -> bool {
        matches!(
            self,
            StoreError::PermissionDenied { .. } | StoreError::SchemaMissing { .. }
        )
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }

    pub fn failure_kind(&self) -> FailureKind {
        if self.is_configuration_problem() {
            FailureKind::Configuration
        } else if self.is_transient() {
            FailureKind::Transient
        } else {
            FailureKind::Rejected
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Decode { .. } => ApiError::TransportError(err.to_string()),
            other => ApiError::PersistenceError {
                kind: other.failure_kind(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds() {
        let denied = StoreError::PermissionDenied {
            table: Table::ReportVerifications,
            message: "new row violates row-level security policy".to_string(),
        };
        assert!(denied.is_configuration_problem());
        assert_eq!(denied.failure_kind(), FailureKind::Configuration);

        let missing = StoreError::SchemaMissing {
            table: Table::CertificateVerifications,
        };
        assert_eq!(missing.failure_kind(), FailureKind::Configuration);

        let down = StoreError::Unavailable("connection refused".to_string());
        assert_eq!(down.failure_kind(), FailureKind::Transient);

        let conflict = StoreError::Conflict {
            table: Table::Attendance,
            message: "duplicate key".to_string(),
        };
        assert_eq!(conflict.failure_kind(), FailureKind::Rejected);
    }

    #[test]
    fn test_into_api_error_keeps_not_found_distinct() {
        let api: ApiError = StoreError::not_found(Table::CertificateVerifications, "abc").into();
        assert!(api.is_not_found());

        let api: ApiError = StoreError::Unavailable("timeout".to_string()).into();
        assert!(!api.is_not_found());
        assert!(matches!(
            api,
            ApiError::PersistenceError {
                kind: FailureKind::Transient,
                ..
            }
        ));

        let api: ApiError = StoreError::SchemaMissing {
            table: Table::ReportVerifications,
        }
        .into();
        assert!(api.is_configuration_problem());

        let api: ApiError = StoreError::Decode {
            table: Table::Courses,
            source: DecodeError::new("name", "too long"),
        }
        .into();
        assert!(matches!(api, ApiError::TransportError(_)));
    }
}
