//! List handler.
//!
//! `GET [base]/[collection]`

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use hospital_persistence::core::{RecordStorage, Resource};
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for listing records.
///
/// Returns every record of type `R` in insertion order. There is no
/// pagination or filtering.
///
/// # HTTP Request
///
/// `GET [base]/[collection]`
///
/// # Response
///
/// - `200 OK` - JSON array of records (empty if there are none)
/// - `503 Service Unavailable` - The store cannot be reached
pub async fn list_handler<S, R>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
    R: Resource,
{
    debug!(resource = R::NAME, "Processing list request");

    let records = state.storage().list::<R>().await?;

    debug!(resource = R::NAME, count = records.len(), "Returning records");

    Ok(Json(records).into_response())
}
