//! The Doctor record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Column, Resource};

/// A doctor on staff.
///
/// ```
/// use hospital_persistence::core::Resource;
/// use hospital_persistence::types::Doctor;
///
/// assert_eq!(Doctor::TABLE, "doctors");
/// assert_eq!(Doctor::permitted_fields().collect::<Vec<_>>(), ["given_name", "surname"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// System-generated identifier.
    pub id: i64,
    /// Given name.
    pub given_name: String,
    /// Family name.
    pub surname: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Resource for Doctor {
    const NAME: &'static str = "Doctor";
    const PARAM_KEY: &'static str = "doctor";
    const TABLE: &'static str = "doctors";
    const COLUMNS: &'static [Column] = &[
        Column::required_text("given_name"),
        Column::required_text("surname"),
    ];
    const DEPENDENTS: &'static [&'static str] = &["patients"];

    fn id(&self) -> i64 {
        self.id
    }
}
