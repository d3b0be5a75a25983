//! Route definitions.

use axum::{Router, routing::get};
use hospital_persistence::core::{Backend, BackendPoolStats, RecordStorage, Resource};
use hospital_persistence::types::{Doctor, Patient};

use crate::handlers;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// ## Operational
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Records (`doctors`, `patients`)
/// - `GET /{collection}` - List
/// - `POST /{collection}` - Create
/// - `GET /{collection}/{id}` - Read
/// - `PATCH /{collection}/{id}` - Update
/// - `PUT /{collection}/{id}` - Update
/// - `DELETE /{collection}/{id}` - Delete
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: RecordStorage + Backend + BackendPoolStats + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        .merge(resource_routes::<S, Doctor>())
        .merge(resource_routes::<S, Patient>())
        .with_state(state)
}

/// Creates the collection and member routes for one resource.
pub fn resource_routes<S, R>() -> Router<AppState<S>>
where
    S: RecordStorage + Send + Sync + 'static,
    R: Resource,
{
    let collection = format!("/{}", R::TABLE);
    let member = format!("/{}/{{id}}", R::TABLE);

    Router::new()
        .route(
            &collection,
            get(handlers::list_handler::<S, R>).post(handlers::create_handler::<S, R>),
        )
        .route(
            &member,
            get(handlers::read_handler::<S, R>)
                .patch(handlers::update_handler::<S, R>)
                .put(handlers::update_handler::<S, R>)
                .delete(handlers::delete_handler::<S, R>),
        )
}
