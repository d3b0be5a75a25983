//! Request parameter extractor.
//!
//! Create and update bodies nest the record's fields under the resource's
//! root key:
//!
//! ```json
//! {"doctor": {"given_name": "Ada", "surname": "Lovelace"}}
//! ```
//!
//! The root key must be present and hold an object. Its contents are then
//! filtered down to the resource's writable fields.

use std::marker::PhantomData;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use hospital_persistence::core::Resource;
use hospital_persistence::types::Attributes;
use hospital_persistence::whitelist;
use serde_json::Value;
use tracing::debug;

use crate::error::{RestError, RestResult};

/// Parses a request body into whitelisted attributes for `R`.
///
/// # Errors
///
/// * `BadRequest` - If the body is not JSON, or the root key is missing or
///   does not hold an object
pub fn parse_params<R: Resource>(body: &[u8]) -> RestResult<Attributes> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RestError::missing_param(R::PARAM_KEY));
    }

    let value: Value = serde_json::from_slice(body)?;

    let raw = value
        .get(R::PARAM_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| RestError::missing_param(R::PARAM_KEY))?;

    let permitted = whitelist::permit::<R>(raw);
    if permitted.len() < raw.len() {
        debug!(
            resource = R::NAME,
            dropped = raw.len() - permitted.len(),
            "Dropped unpermitted fields"
        );
    }

    Ok(permitted)
}

/// Axum extractor for whitelisted record attributes.
///
/// # Example
///
/// ```rust,ignore
/// use hospital_rest::extractors::Params;
/// use hospital_persistence::types::Doctor;
///
/// async fn handler(params: Params<Doctor>) {
///     let attrs = params.into_inner();
/// }
/// ```
#[derive(Debug)]
pub struct Params<R> {
    attrs: Attributes,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Params<R> {
    /// Returns the attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    /// Consumes the extractor and returns the attributes.
    pub fn into_inner(self) -> Attributes {
        self.attrs
    }
}

impl<S, R> FromRequest<S> for Params<R>
where
    S: Send + Sync,
    R: Resource,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let attrs = parse_params::<R>(&body).map_err(IntoResponse::into_response)?;

        Ok(Params {
            attrs,
            _resource: PhantomData,
        })
    }
}
