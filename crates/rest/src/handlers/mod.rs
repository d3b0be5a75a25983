//! HTTP request handlers for record operations.
//!
//! Every record handler is generic over the storage backend `S` and the
//! [`Resource`](hospital_persistence::core::Resource) `R` it serves, so the
//! doctor and patient endpoints share one implementation.
//!
//! - [`list`] - List all records of a type
//! - [`read`] - Read a record by id
//! - [`create`] - Create a new record
//! - [`update`] - Update an existing record
//! - [`delete`] - Delete a record
//! - [`health`] - Health check endpoints

pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod read;
pub mod update;

// Re-export handlers for convenience
pub use create::create_handler;
pub use delete::delete_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use list::list_handler;
pub use read::read_handler;
pub use update::update_handler;
