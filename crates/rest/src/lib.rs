//! # hospital-rest - Hospital Records JSON API
//!
//! This crate provides the HTTP layer of the hospital records service: CRUD
//! endpoints for doctors and patients over JSON, backed by any storage that
//! implements [`RecordStorage`](hospital_persistence::core::RecordStorage).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hospital_rest::{create_app, ServerConfig};
//! use hospital_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Create a storage backend
//!     let backend = SqliteBackend::open("hospital.db")?;
//!     backend.init_schema()?;
//!
//!     // Create the Axum application
//!     let app = create_app(backend);
//!
//!     // Start the server
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern | Success |
//! |-----------|-------------|-------------|---------|
//! | list | GET | `/doctors`, `/patients` | 200 |
//! | read | GET | `/[collection]/[id]` | 200 |
//! | create | POST | `/[collection]` | 201 + `Location` |
//! | update | PATCH, PUT | `/[collection]/[id]` | 204 |
//! | delete | DELETE | `/[collection]/[id]` | 204 |
//! | health | GET | `/health`, `/_liveness`, `/_readiness` | 200 |
//!
//! Create and update bodies nest the fields under the singular resource
//! name: `{"doctor": {"given_name": "Ada", "surname": "Lovelace"}}`.
//!
//! ## Error Handling
//!
//! | HTTP Status | Body | Cause |
//! |-------------|------|-------|
//! | 400 | `{"error": ...}` | Missing root key or malformed JSON |
//! | 404 | `{"error": "Couldn't find Doctor with 'id'=7"}` | Unknown id |
//! | 422 | `{"surname": ["can't be blank"]}` | Field errors |
//! | 503 | `{"error": ...}` | Store unavailable |
//! | 500 | `{"error": ...}` | Internal error |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their HTTP mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors for ids and request parameters
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use hospital_persistence::core::{Backend, BackendPoolStats, RecordStorage};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default settings.
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: RecordStorage + Backend + BackendPoolStats + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use hospital_rest::{create_app_with_config, ServerConfig};
/// use hospital_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: RecordStorage + Backend + BackendPoolStats + Send + Sync + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        RecordStorage::backend_name(&storage)
    );

    // Create application state
    let state = AppState::new(Arc::new(storage), config.clone());

    // Build the router with all routes
    let router = routing::create_routes(state).layer(DefaultBodyLimit::max(config.max_body_size));

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    let router = router.layer(service_builder);

    // Outermost, so the id exists before tracing starts
    if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    }
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG`, when set,
/// takes precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "hospital_rest={level},hospital_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
