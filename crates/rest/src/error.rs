//! Error types for the hospital records API.
//!
//! This module defines the error type used throughout the REST layer and its
//! conversion into HTTP responses.
//!
//! # Error Mapping
//!
//! Storage errors from the persistence layer are mapped to HTTP status codes:
//!
//! | Storage Error | HTTP Status | Body |
//! |--------------|-------------|------|
//! | NotFound | 404 | `{"error": "Couldn't find Doctor with 'id'=7"}` |
//! | Rejected | 422 | `{"surname": ["can't be blank"]}` |
//! | Unavailable / ConnectionFailed | 503 | `{"error": "..."}` |
//! | other backend errors | 500 | `{"error": "..."}` |
//!
//! Client errors are expected outcomes and are logged at `debug`; server
//! errors are logged at `error` when the response is built.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hospital_persistence::error::{BackendError, ResourceError, StorageError, ValidationError};
use hospital_persistence::types::FieldErrors;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// Record not found (HTTP 404).
    #[error("Couldn't find {resource} with 'id'={id}")]
    NotFound {
        /// The record type (e.g., "Doctor").
        resource: String,
        /// The id as it appeared in the request.
        id: String,
    },

    /// Malformed request (HTTP 400).
    #[error("{message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// The store rejected the submitted fields (HTTP 422).
    #[error("Validation failed: {0}")]
    Unprocessable(FieldErrors),

    /// The store could not be reached (HTTP 503).
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("Internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Creates a bad request error for a missing or non-object root key.
    pub fn missing_param(key: &str) -> Self {
        RestError::BadRequest {
            message: format!("param is missing or the value is empty: {}", key),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RestError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        match self {
            RestError::Unprocessable(errors) => (status, Json(errors)).into_response(),
            other => (status, Json(json!({ "error": other.to_string() }))).into_response(),
        }
    }
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        if err.is_transient() {
            return RestError::ServiceUnavailable {
                message: err.to_string(),
            };
        }

        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { resource, id } => RestError::NotFound {
                resource: resource.to_string(),
                id: id.to_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Rejected(errors) => RestError::Unprocessable(errors),
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        StorageError::Backend(err).into()
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::BadRequest {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = RestError::NotFound {
            resource: "Doctor".to_string(),
            id: "123".to_string(),
        };
        assert_eq!(err.to_string(), "Couldn't find Doctor with 'id'=123");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_param_message() {
        let err = RestError::missing_param("patient");
        assert_eq!(
            err.to_string(),
            "param is missing or the value is empty: patient"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_not_found_maps_to_404() {
        let err: RestError = StorageError::from(ResourceError::NotFound {
            resource: "Patient",
            id: 9,
        })
        .into();
        assert_eq!(err.to_string(), "Couldn't find Patient with 'id'=9");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rejected_maps_to_422() {
        let mut errors = FieldErrors::new();
        errors.add("surname", "can't be blank");
        let err: RestError = StorageError::from(ValidationError::Rejected(errors)).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_unavailable_maps_to_503() {
        let err: RestError = StorageError::from(BackendError::Unavailable {
            backend_name: "sqlite".to_string(),
            message: "timed out waiting for connection".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_other_backend_errors_map_to_500() {
        let err: RestError = StorageError::from(BackendError::QueryError {
            message: "no such table: doctors".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
