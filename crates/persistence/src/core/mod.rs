//! Core storage traits and abstractions.
//!
//! - [`Resource`] - Describes a record type: its table, root key and columns
//! - [`RecordStorage`] - CRUD operations, generic over the resource
//! - [`Backend`] - Database driver lifecycle (schema, migrations, health)

pub mod backend;
pub mod resource;
pub mod storage;

pub use backend::{Backend, BackendKind, BackendPoolStats};
pub use resource::{Column, ColumnKind, Resource};
pub use storage::RecordStorage;
