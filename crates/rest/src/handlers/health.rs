//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness endpoints for monitoring and load
//! balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hospital_persistence::core::{Backend, BackendPoolStats, RecordStorage};
use tracing::{debug, warn};

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - Server is up
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: RecordStorage + Send + Sync,
{
    debug!("Processing health check request");

    let backend_name = state.storage().backend_name();

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": backend_name,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe.
///
/// Runs a probe query against the store.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - The store answered
/// - `503 Service Unavailable` - The store did not answer
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: RecordStorage + Backend + BackendPoolStats + Send + Sync,
{
    debug!("Processing readiness check request");

    let storage = state.storage();
    let connections = serde_json::json!({
        "active": storage.active_connections(),
        "idle": storage.idle_connections()
    });

    match storage.health_check().await {
        Ok(()) => {
            let response = serde_json::json!({
                "status": "ready",
                "backend": Backend::name(storage),
                "checks": {
                    "storage": "ok"
                },
                "connections": connections
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            let response = serde_json::json!({
                "status": "unavailable",
                "backend": Backend::name(storage),
                "checks": {
                    "storage": e.to_string()
                },
                "connections": connections
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
        }
    }
}
