//! The [`Resource`] trait describing a persisted record type.
//!
//! A resource declares its table, the root key its request bodies are nested
//! under, and the columns a client may write. The column list doubles as the
//! whitelist and as the rule set applied at persistence time, so the two can
//! never drift apart.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// How a writable column is typed and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Free text. Numbers and booleans are stored in their textual form.
    Text,
    /// Nullable integer foreign key into another resource's table.
    Reference {
        /// Table holding the referenced rows.
        table: &'static str,
        /// Name under which a dangling reference is reported (e.g. `doctor`).
        association: &'static str,
    },
}

/// A client-writable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Column and JSON field name.
    pub name: &'static str,
    /// Type of the column.
    pub kind: ColumnKind,
    /// Whether a non-blank value is required.
    pub required: bool,
}

impl Column {
    /// A required text column.
    pub const fn required_text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
            required: true,
        }
    }

    /// An optional text column.
    pub const fn optional_text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
            required: false,
        }
    }

    /// An optional reference column.
    pub const fn reference(
        name: &'static str,
        table: &'static str,
        association: &'static str,
    ) -> Self {
        Self {
            name,
            kind: ColumnKind::Reference { table, association },
            required: false,
        }
    }
}

/// A record type managed by the service.
///
/// Every resource carries a system-generated integer `id` plus `created_at`
/// and `updated_at` timestamps in addition to its [`COLUMNS`](Resource::COLUMNS).
/// The serialized form of an implementor must use exactly those field names.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human-readable type name, e.g. `Doctor`.
    const NAME: &'static str;

    /// Root key request bodies are nested under, e.g. `doctor`.
    const PARAM_KEY: &'static str;

    /// Table name, also used as the URL collection segment.
    const TABLE: &'static str;

    /// Client-writable columns, in table order.
    const COLUMNS: &'static [Column];

    /// Tables holding rows that reference this resource.
    const DEPENDENTS: &'static [&'static str] = &[];

    /// The system-generated identifier.
    fn id(&self) -> i64;

    /// Field names a client may set on create or update.
    fn permitted_fields() -> impl Iterator<Item = &'static str> {
        Self::COLUMNS.iter().map(|c| c.name)
    }
}
