//! Tests for the fully layered application built from a [`ServerConfig`].

use axum::http::{HeaderName, HeaderValue, StatusCode, header::LOCATION};
use axum_test::TestServer;
use hospital_persistence::backends::sqlite::SqliteBackend;
use hospital_rest::{ServerConfig, create_app_with_config};
use serde_json::{Value, json};

const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn server_for(backend: SqliteBackend, config: ServerConfig) -> TestServer {
    TestServer::new(create_app_with_config(backend, config)).expect("Failed to create test server")
}

fn file_backend(path: &std::path::Path) -> SqliteBackend {
    let backend = SqliteBackend::open(path).expect("Failed to open SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    backend
}

#[tokio::test]
async fn test_records_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hospital.db");

    let id = {
        let server = server_for(file_backend(&path), ServerConfig::for_testing());
        let response = server
            .post("/doctors")
            .json(&json!({"doctor": {"given_name": "Ann", "surname": "Lee"}}))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["id"].as_i64().unwrap()
    };

    let server = server_for(file_backend(&path), ServerConfig::for_testing());
    let response = server.get(&format!("/doctors/{id}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["surname"], "Lee");
}

#[tokio::test]
async fn test_location_uses_configured_base_url() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend.init_schema().unwrap();
    let config = ServerConfig {
        base_url: "https://records.example.org/".to_string(),
        ..ServerConfig::for_testing()
    };
    let server = server_for(backend, config);

    let response = server
        .post("/patients")
        .json(&json!({"patient": {"given_name": "Bob", "surname": "Stone"}}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let id = response.json::<Value>()["id"].as_i64().unwrap();
    assert_eq!(
        response.header(LOCATION).to_str().unwrap(),
        format!("https://records.example.org/patients/{id}")
    );
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend.init_schema().unwrap();
    let config = ServerConfig {
        enable_request_id: true,
        ..ServerConfig::for_testing()
    };
    let server = server_for(backend, config);

    let generated = server.get("/doctors").await;
    generated.assert_status_ok();
    assert!(generated.headers().contains_key(X_REQUEST_ID));

    let echoed = server
        .get("/doctors")
        .add_header(X_REQUEST_ID, HeaderValue::from_static("trace-42"))
        .await;
    assert_eq!(echoed.header(X_REQUEST_ID).to_str().unwrap(), "trace-42");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend.init_schema().unwrap();
    let config = ServerConfig {
        max_body_size: 64,
        ..ServerConfig::for_testing()
    };
    let server = server_for(backend, config);

    let response = server
        .post("/doctors")
        .json(&json!({"doctor": {"given_name": "A".repeat(200), "surname": "Lee"}}))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}
