//! Update handler.
//!
//! `PATCH [base]/[collection]/[id]` and `PUT [base]/[collection]/[id]`

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hospital_persistence::core::{RecordStorage, Resource};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{ResourceId, parse_params};
use crate::state::AppState;

/// Handler for updating a record.
///
/// The target is resolved before the body is looked at, so an unknown id is
/// always a 404 whatever was sent. Fields present in the body replace the
/// stored values; absent fields are kept. PUT and PATCH behave the same.
///
/// # HTTP Request
///
/// `PATCH [base]/[collection]/[id]`
///
/// # Response
///
/// - `204 No Content` - Record updated
/// - `400 Bad Request` - The root key is missing or not an object
/// - `404 Not Found` - No record has this id
/// - `422 Unprocessable Entity` - Field errors for the merged record
///
/// # Example
///
/// ```http
/// PATCH /patients/3 HTTP/1.1
/// Host: records.example.org
/// Content-Type: application/json
///
/// {"patient": {"doctor_id": 1}}
/// ```
pub async fn update_handler<S, R>(
    State(state): State<AppState<S>>,
    id: ResourceId,
    body: Bytes,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
    R: Resource,
{
    debug!(resource = R::NAME, id = %id, "Processing update request");

    let numeric_id = id.resolve::<R>()?;
    let current = state
        .storage()
        .find::<R>(numeric_id)
        .await?
        .ok_or_else(|| id.not_found::<R>())?;

    let attrs = parse_params::<R>(&body)?;

    state.storage().update(&current, &attrs).await?;

    debug!(resource = R::NAME, id = numeric_id, "Record updated");

    Ok(StatusCode::NO_CONTENT.into_response())
}
