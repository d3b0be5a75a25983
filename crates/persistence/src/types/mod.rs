//! Record types and value types for the persistence layer.
//!
//! - [`Doctor`], [`Patient`] - The persisted records
//! - [`FieldErrors`] - Validation errors keyed by field
//! - [`Attributes`] - Client-supplied field values

mod doctor;
mod field_errors;
mod patient;

pub use doctor::Doctor;
pub use field_errors::FieldErrors;
pub use patient::Patient;

/// Client-supplied field values, keyed by field name.
pub type Attributes = serde_json::Map<String, serde_json::Value>;
