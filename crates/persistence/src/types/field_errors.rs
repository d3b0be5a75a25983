//! Field-keyed validation errors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors keyed by field name.
///
/// Serializes as a plain JSON object mapping each field to the list of
/// human-readable reasons it was rejected:
///
/// ```
/// use hospital_persistence::types::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.add("surname", "can't be blank");
///
/// let json = serde_json::to_value(&errors).unwrap();
/// assert_eq!(json, serde_json::json!({"surname": ["can't be blank"]}));
/// ```
///
/// Keys are kept in sorted order so responses are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a reason against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Returns the reasons recorded for a field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns true if a field has at least one reason.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns true if no errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, reasons)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reasons) in self.iter() {
            for reason in reasons {
                if !first {
                    write!(f, ", ")?;
                }
                if field == "base" {
                    write!(f, "{}", reason)?;
                } else {
                    write!(f, "{} {}", field, reason)?;
                }
                first = false;
            }
        }
        Ok(())
    }
}
