//! The Patient record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Column, Resource};

/// A patient, optionally assigned to a [`Doctor`](super::Doctor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// System-generated identifier.
    pub id: i64,
    /// Given name.
    pub given_name: String,
    /// Family name.
    pub surname: String,
    /// Date of birth, as entered.
    pub born_on: Option<String>,
    /// Gender, as entered.
    pub gender: Option<String>,
    /// The attending doctor, if any.
    pub doctor_id: Option<i64>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Resource for Patient {
    const NAME: &'static str = "Patient";
    const PARAM_KEY: &'static str = "patient";
    const TABLE: &'static str = "patients";
    const COLUMNS: &'static [Column] = &[
        Column::required_text("given_name"),
        Column::required_text("surname"),
        Column::optional_text("born_on"),
        Column::optional_text("gender"),
        Column::reference("doctor_id", "doctors", "doctor"),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}
