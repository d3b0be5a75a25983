//! Backend abstraction for database drivers.
//!
//! This module defines the [`Backend`] trait, covering the lifecycle of a
//! database backend (schema setup, migrations, health probes) separately
//! from the record operations in [`RecordStorage`](super::RecordStorage).

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::BackendError;

/// Identifies the type of database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// SQLite database (file-based or in-memory).
    Sqlite,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// A database backend.
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Returns the kind of backend.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Checks if the backend is healthy and accepting connections.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Initializes the database schema if needed.
    async fn initialize(&self) -> Result<(), BackendError>;

    /// Runs any pending migrations.
    async fn migrate(&self) -> Result<(), BackendError>;
}

/// Extension trait for backends that support connection pooling statistics.
pub trait BackendPoolStats {
    /// Returns the current number of active connections.
    fn active_connections(&self) -> u32;

    /// Returns the current number of idle connections.
    fn idle_connections(&self) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::Sqlite.to_string(), "sqlite");
    }
}
