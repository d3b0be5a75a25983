//! REST API test harness.
//!
//! Wraps an [`axum_test::TestServer`] over a freshly migrated in-memory
//! SQLite store.

use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use hospital_persistence::backends::sqlite::SqliteBackend;
use hospital_persistence::core::{RecordStorage, Resource};
use hospital_rest::routing::create_routes;
use hospital_rest::{AppState, ServerConfig};
use serde_json::Value;

/// Test harness for REST API testing.
///
/// # Example
///
/// ```rust,ignore
/// let harness = RestTestHarness::new().await;
/// let id = harness.create_id("/doctors", &fixtures::doctor("Gregory", "House")).await;
/// harness.get(&format!("/doctors/{id}")).await.assert_status_ok();
/// ```
pub struct RestTestHarness {
    /// The test server instance.
    pub server: TestServer,

    /// The storage backend, shared with the server.
    pub backend: Arc<SqliteBackend>,

    /// Server configuration.
    pub config: ServerConfig,
}

impl RestTestHarness {
    /// Creates a harness backed by an in-memory database.
    pub async fn new() -> Self {
        let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
        backend.init_schema().expect("Failed to init schema");
        let backend = Arc::new(backend);

        let config = ServerConfig::for_testing();
        let state = AppState::new(Arc::clone(&backend), config.clone());
        let server = TestServer::new(create_routes(state)).expect("Failed to create test server");

        Self {
            server,
            backend,
            config,
        }
    }

    /// Makes a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.server.get(path).await
    }

    /// Makes a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        self.server.post(path).json(body).await
    }

    /// Makes a PATCH request with a JSON body.
    pub async fn patch(&self, path: &str, body: &Value) -> TestResponse {
        self.server.patch(path).json(body).await
    }

    /// Makes a PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        self.server.put(path).json(body).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.server.delete(path).await
    }

    /// Creates a record and returns its id.
    pub async fn create_id(&self, path: &str, body: &Value) -> i64 {
        let response = self.post(path, body).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"]
            .as_i64()
            .expect("created record has an integer id")
    }

    /// Counts the stored records of type `R`, bypassing HTTP.
    pub async fn count<R: Resource>(&self) -> u64 {
        self.backend.count::<R>().await.expect("count failed")
    }
}
