//! Read handler.
//!
//! `GET [base]/[collection]/[id]`

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use hospital_persistence::core::{RecordStorage, Resource};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::ResourceId;
use crate::state::AppState;

/// Handler for reading one record.
///
/// # HTTP Request
///
/// `GET [base]/[collection]/[id]`
///
/// # Response
///
/// - `200 OK` - The record
/// - `404 Not Found` - No record has this id
///
/// # Example
///
/// ```http
/// GET /doctors/1 HTTP/1.1
/// Host: records.example.org
/// Accept: application/json
/// ```
pub async fn read_handler<S, R>(
    State(state): State<AppState<S>>,
    id: ResourceId,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
    R: Resource,
{
    debug!(resource = R::NAME, id = %id, "Processing read request");

    let numeric_id = id.resolve::<R>()?;

    match state.storage().find::<R>(numeric_id).await? {
        Some(record) => Ok(Json(record).into_response()),
        None => {
            debug!(resource = R::NAME, id = %id, "Record not found");
            Err(id.not_found::<R>())
        }
    }
}
