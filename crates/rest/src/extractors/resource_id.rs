//! Record id extractor.
//!
//! Extracts the `{id}` path segment as written. Ids are integers, but a
//! non-integer segment is not a client syntax error: it simply names a record
//! that cannot exist, so it resolves to 404 like any other unknown id.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use hospital_persistence::core::Resource;

use crate::error::{RestError, RestResult};

/// Axum extractor for the `{id}` path segment.
///
/// # Example
///
/// ```rust,ignore
/// use hospital_rest::extractors::ResourceId;
///
/// async fn handler(id: ResourceId) {
///     println!("Requested id: {}", id);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a ResourceId from a raw path segment.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the segment as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric id, if the segment is one.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    /// Resolves the numeric id of a record of type `R`.
    ///
    /// Returns `NotFound` if the segment cannot be an id.
    pub fn resolve<R: Resource>(&self) -> RestResult<i64> {
        self.as_i64().ok_or_else(|| self.not_found::<R>())
    }

    /// Builds the `NotFound` error for this id.
    pub fn not_found<R: Resource>(&self) -> RestError {
        RestError::NotFound {
            resource: R::NAME.to_string(),
            id: self.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(ResourceId(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_persistence::types::Doctor;

    #[test]
    fn test_numeric_id() {
        let id = ResourceId::new("42");
        assert_eq!(id.as_i64(), Some(42));
        assert_eq!(id.resolve::<Doctor>().unwrap(), 42);
    }

    #[test]
    fn test_non_numeric_id_is_not_found() {
        let id = ResourceId::new("abc");
        assert_eq!(id.as_i64(), None);

        let err = id.resolve::<Doctor>().unwrap_err();
        assert_eq!(err.to_string(), "Couldn't find Doctor with 'id'=abc");
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceId::new("7").to_string(), "7");
    }
}
