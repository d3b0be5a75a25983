//! Application state for the hospital records API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the storage backend and the server configuration.

use std::sync::Arc;

use hospital_persistence::core::RecordStorage;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`RecordStorage`])
///
/// # Example
///
/// ```rust,ignore
/// use hospital_rest::{AppState, ServerConfig};
/// use hospital_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig::default();
/// let state = AppState::new(Arc::new(backend), config);
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: RecordStorage> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL for the server, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Builds the absolute URL of a record.
    pub fn record_url(&self, collection: &str, id: i64) -> String {
        format!("{}/{}/{}", self.base_url(), collection, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hospital_persistence::core::Resource;
    use hospital_persistence::error::StorageResult;
    use hospital_persistence::types::Attributes;

    // Mock storage for testing
    struct MockStorage;

    #[async_trait]
    impl RecordStorage for MockStorage {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        async fn list<R: Resource>(&self) -> StorageResult<Vec<R>> {
            unimplemented!()
        }

        async fn find<R: Resource>(&self, _id: i64) -> StorageResult<Option<R>> {
            unimplemented!()
        }

        async fn create<R: Resource>(&self, _attrs: &Attributes) -> StorageResult<R> {
            unimplemented!()
        }

        async fn update<R: Resource>(&self, _current: &R, _attrs: &Attributes) -> StorageResult<R> {
            unimplemented!()
        }

        async fn delete<R: Resource>(&self, _id: i64) -> StorageResult<()> {
            unimplemented!()
        }

        async fn count<R: Resource>(&self) -> StorageResult<u64> {
            unimplemented!()
        }
    }

    #[test]
    fn test_app_state_creation() {
        let storage = Arc::new(MockStorage);
        let config = ServerConfig::default();
        let state = AppState::new(storage, config);

        assert_eq!(state.storage().backend_name(), "mock");
        assert_eq!(state.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_record_url() {
        let storage = Arc::new(MockStorage);
        let config = ServerConfig {
            base_url: "https://records.example.org/".to_string(),
            ..Default::default()
        };
        let state = AppState::new(storage, config);

        assert_eq!(
            state.record_url("doctors", 12),
            "https://records.example.org/doctors/12"
        );
    }

    #[test]
    fn test_app_state_clone() {
        let storage = Arc::new(MockStorage);
        let config = ServerConfig::default();
        let state = AppState::new(storage, config);
        let cloned = state.clone();

        assert_eq!(state.base_url(), cloned.base_url());
    }
}
