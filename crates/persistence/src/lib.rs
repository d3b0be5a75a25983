//! Hospital Records Persistence Layer
//!
//! This crate provides the record types and relational storage behind the
//! hospital records service: doctors, patients, the rules their fields must
//! satisfy, and a SQLite backend with versioned schema migrations.
//!
//! # Features
//!
//! - **Generic records**: one [`RecordStorage`] implementation serves every
//!   [`Resource`](core::Resource) type
//! - **Whitelisting**: unknown client fields are dropped before anything else
//! - **Persistence-time validation**: every field is checked and all failures
//!   are reported together as [`FieldErrors`](types::FieldErrors)
//! - **Migrations**: the schema is created and upgraded on startup
//!
//! Available backend features:
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! # Architecture
//!
//! - [`types`] - Record types and field error sets
//! - [`whitelist`] - Field filtering
//! - [`validation`] - Column rules applied by the store
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits and abstractions
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```no_run
//! use hospital_persistence::backends::sqlite::SqliteBackend;
//! use hospital_persistence::types::Doctor;
//! use hospital_persistence::{RecordStorage, whitelist};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let raw = json!({"given_name": "Ada", "surname": "Lovelace", "id": 7});
//! let attrs = whitelist::permit::<Doctor>(raw.as_object().unwrap());
//!
//! let doctor: Doctor = backend.create(&attrs).await?;
//! assert_ne!(doctor.id, 7);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;
pub mod validation;
pub mod whitelist;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{Attributes, Doctor, FieldErrors, Patient};

// Re-export core traits
pub use core::{Backend, BackendKind, RecordStorage, Resource};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
