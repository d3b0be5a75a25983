//! Error types for the persistence layer.
//!
//! Errors are grouped by category so callers can tell expected outcomes
//! (a missing record, a rejected field set) apart from infrastructure faults
//! (the database cannot be reached).

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

use crate::types::FieldErrors;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Record state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Field validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns true if a retry might succeed.
    ///
    /// Only an unreachable store is transient; missing records and rejected
    /// field sets will fail the same way every time.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StorageError::Backend(
                BackendError::Unavailable { .. } | BackendError::ConnectionFailed { .. }
            )
        )
    }

    /// Returns the field errors if this is a validation rejection.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            StorageError::Validation(ValidationError::Rejected(errors)) => Some(errors),
            _ => None,
        }
    }
}

/// Errors related to record state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested record does not exist.
    #[error("Couldn't find {resource} with 'id'={id}")]
    NotFound { resource: &'static str, id: i64 },
}

/// Errors raised when the store refuses a write.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// One or more fields failed validation, or a constraint blocked the write.
    #[error("validation failed: {0}")]
    Rejected(FieldErrors),
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema migration error.
    #[error("schema migration {version} failed: {message}")]
    MigrationError { version: i32, message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
