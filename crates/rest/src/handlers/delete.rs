//! Delete handler.
//!
//! `DELETE [base]/[collection]/[id]`

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hospital_persistence::core::{RecordStorage, Resource};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::ResourceId;
use crate::state::AppState;

/// Handler for deleting a record.
///
/// Removal is permanent. A doctor that patients still refer to cannot be
/// removed.
///
/// # HTTP Request
///
/// `DELETE [base]/[collection]/[id]`
///
/// # Response
///
/// - `204 No Content` - Record deleted
/// - `404 Not Found` - No record has this id
/// - `422 Unprocessable Entity` - Other records still depend on this one
pub async fn delete_handler<S, R>(
    State(state): State<AppState<S>>,
    id: ResourceId,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
    R: Resource,
{
    debug!(resource = R::NAME, id = %id, "Processing delete request");

    let numeric_id = id.resolve::<R>()?;
    state.storage().delete::<R>(numeric_id).await?;

    debug!(resource = R::NAME, id = numeric_id, "Record deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
