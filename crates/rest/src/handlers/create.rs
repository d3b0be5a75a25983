//! Create handler.
//!
//! `POST [base]/[collection]`

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use hospital_persistence::core::{RecordStorage, Resource};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::Params;
use crate::state::AppState;

/// Handler for creating a record.
///
/// The server assigns the id and both timestamps. Fields outside the
/// resource's whitelist are ignored.
///
/// # HTTP Request
///
/// `POST [base]/[collection]`
///
/// # Response
///
/// - `201 Created` - The new record, with a `Location` header
/// - `400 Bad Request` - The root key is missing or not an object
/// - `422 Unprocessable Entity` - Field errors, e.g. `{"surname": ["can't be blank"]}`
///
/// # Example
///
/// ```http
/// POST /doctors HTTP/1.1
/// Host: records.example.org
/// Content-Type: application/json
///
/// {"doctor": {"given_name": "Ada", "surname": "Lovelace"}}
/// ```
pub async fn create_handler<S, R>(
    State(state): State<AppState<S>>,
    params: Params<R>,
) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
    R: Resource,
{
    debug!(
        resource = R::NAME,
        fields = params.attributes().len(),
        "Processing create request"
    );

    let attrs = params.into_inner();
    let record: R = state.storage().create(&attrs).await?;
    let location = state.record_url(R::TABLE, record.id());

    debug!(resource = R::NAME, id = record.id(), "Record created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    )
        .into_response())
}
