//! Persistence-time validation of record attributes.
//!
//! Every writable column of a resource is checked, and all failures are
//! collected rather than stopping at the first one. The store calls
//! [`validate`] on the full candidate record (on update, the current record
//! with the client's changes merged over it), so a required field is never
//! lost by omitting it from a partial update.
//!
//! | Column kind | Accepted | Rejected with |
//! |---|---|---|
//! | required text | non-blank string, number, boolean | `can't be blank` |
//! | text | string, number, boolean, null | `is invalid` |
//! | reference | integer, integer string, `""`, null | `is not a number`, `must be an integer` |
//!
//! Whether a reference points at an existing row can only be answered by the
//! store itself and is checked there.

use serde_json::Value;

use crate::core::{Column, ColumnKind, Resource};
use crate::types::{Attributes, FieldErrors};

/// Message for a missing or blank required field.
pub const BLANK: &str = "can't be blank";
/// Message for a value of the wrong shape.
pub const INVALID: &str = "is invalid";
/// Message for a non-numeric reference.
pub const NOT_A_NUMBER: &str = "is not a number";
/// Message for a fractional reference.
pub const NOT_AN_INTEGER: &str = "must be an integer";
/// Message for a reference to a row that does not exist.
pub const MUST_EXIST: &str = "must exist";

/// A column value ready to be bound to a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    /// Text column.
    Text(Option<String>),
    /// Integer column.
    Integer(Option<i64>),
}

/// The outcome of validating a candidate record.
#[derive(Debug)]
pub struct Validated {
    /// Normalized values, one per writable column, in column order.
    pub values: Vec<(&'static Column, ColumnValue)>,
    /// Every failure found.
    pub errors: FieldErrors,
}

impl Validated {
    /// Returns true if no failures were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates a candidate record of type `R`.
///
/// Fields absent from `attrs` are treated as null. Keys that are not
/// writable columns are ignored.
pub fn validate<R: Resource>(attrs: &Attributes) -> Validated {
    let mut values = Vec::with_capacity(R::COLUMNS.len());
    let mut errors = FieldErrors::new();

    for column in R::COLUMNS {
        let raw = attrs.get(column.name).unwrap_or(&Value::Null);
        let value = match column.kind {
            ColumnKind::Text => ColumnValue::Text(text_value(column, raw, &mut errors)),
            ColumnKind::Reference { .. } => {
                ColumnValue::Integer(reference_value(column, raw, &mut errors))
            }
        };
        values.push((column, value));
    }

    Validated { values, errors }
}

fn text_value(column: &Column, raw: &Value, errors: &mut FieldErrors) -> Option<String> {
    let text = match raw {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => {
            errors.add(column.name, INVALID);
            return None;
        }
    };

    if column.required && text.as_deref().is_none_or(|s| s.trim().is_empty()) {
        errors.add(column.name, BLANK);
    }
    text
}

fn reference_value(column: &Column, raw: &Value, errors: &mut FieldErrors) -> Option<i64> {
    match raw {
        Value::Null => None,
        Value::Number(n) => match n.as_i64() {
            Some(id) => Some(id),
            None => {
                errors.add(column.name, NOT_AN_INTEGER);
                None
            }
        },
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) if s.trim().parse::<f64>().is_ok() => {
                errors.add(column.name, NOT_AN_INTEGER);
                None
            }
            Err(_) => {
                errors.add(column.name, NOT_A_NUMBER);
                None
            }
        },
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            errors.add(column.name, NOT_A_NUMBER);
            None
        }
    }
}
