//! SQLite backend implementation.
//!
//! This module provides the SQLite implementation of the storage traits.
//! It supports both in-memory databases (great for testing) and file-based
//! databases.
//!
//! # Features
//!
//! - In-memory and file-based modes
//! - Pooled connections with foreign keys enforced on each one
//! - Versioned schema migrations, applied on startup
//! - Persistence-time validation, including reference checks
//!
//! # Example
//!
//! ```no_run
//! use hospital_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an in-memory database
//! let backend = SqliteBackend::in_memory()?;
//!
//! // Create or upgrade the schema
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE doctors (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     given_name TEXT,
//!     surname TEXT,
//!     created_at TEXT NOT NULL,
//!     updated_at TEXT NOT NULL
//! );
//!
//! CREATE TABLE patients (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     given_name TEXT,
//!     surname TEXT,
//!     born_on TEXT,
//!     gender TEXT,
//!     created_at TEXT NOT NULL,
//!     updated_at TEXT NOT NULL,
//!     doctor_id INTEGER REFERENCES doctors(id)
//! );
//! ```

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
