//! RecordStorage implementation for SQLite.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use rusqlite::types::Value as SqlValue;
use rusqlite::{
    Connection, ErrorCode, OptionalExtension, Row, TransactionBehavior, params, params_from_iter,
};
use serde_json::{Map, Value};

use crate::core::{ColumnKind, RecordStorage, Resource};
use crate::error::{BackendError, ResourceError, StorageError, StorageResult, ValidationError};
use crate::types::{Attributes, FieldErrors};
use crate::validation::{self, ColumnValue, Validated};

use super::SqliteBackend;

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

/// Maps a driver error. Lock contention that outlasts the busy timeout means
/// the store cannot take the request right now.
fn query_error(context: impl std::fmt::Display, err: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        if matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) {
            return StorageError::Backend(BackendError::Unavailable {
                backend_name: "sqlite".to_string(),
                message: format!("{}: {}", context, err),
            });
        }
    }
    StorageError::Backend(BackendError::QueryError {
        message: format!("{}: {}", context, err),
    })
}

fn serialization_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::SerializationError { message })
}

fn not_found<R: Resource>(id: i64) -> StorageError {
    StorageError::Resource(ResourceError::NotFound {
        resource: R::NAME,
        id,
    })
}

fn rejected(errors: FieldErrors) -> StorageError {
    StorageError::Validation(ValidationError::Rejected(errors))
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

/// Column list for reading a full record of `R`.
fn select_columns<R: Resource>() -> Vec<&'static str> {
    let mut columns = Vec::with_capacity(R::COLUMNS.len() + 3);
    columns.push("id");
    columns.extend(R::permitted_fields());
    columns.push("created_at");
    columns.push("updated_at");
    columns
}

fn select_sql<R: Resource>() -> String {
    format!("SELECT {} FROM {}", select_columns::<R>().join(", "), R::TABLE)
}

/// Reads the raw values of a row selected with [`select_sql`].
fn read_row(row: &Row<'_>, width: usize) -> rusqlite::Result<Vec<SqlValue>> {
    (0..width).map(|idx| row.get::<_, SqlValue>(idx)).collect()
}

/// Maps the values read by [`read_row`] onto a record.
fn to_record<R: Resource>(columns: &[&'static str], values: Vec<SqlValue>) -> StorageResult<R> {
    let mut object = Map::with_capacity(columns.len());
    for (name, value) in columns.iter().zip(values) {
        let value = match value {
            SqlValue::Null => Value::Null,
            SqlValue::Integer(i) => Value::from(i),
            SqlValue::Real(f) => Value::from(f),
            SqlValue::Text(s) => Value::String(s),
            SqlValue::Blob(_) => {
                return Err(serialization_error(format!(
                    "Unexpected binary value in {}.{}",
                    R::TABLE,
                    name
                )));
            }
        };
        object.insert((*name).to_string(), value);
    }

    serde_json::from_value(Value::Object(object))
        .map_err(|e| serialization_error(format!("Failed to decode {}: {}", R::NAME, e)))
}

fn to_sql(value: &ColumnValue) -> SqlValue {
    match value {
        ColumnValue::Text(Some(s)) => SqlValue::Text(s.clone()),
        ColumnValue::Integer(Some(i)) => SqlValue::Integer(*i),
        ColumnValue::Text(None) | ColumnValue::Integer(None) => SqlValue::Null,
    }
}

impl SqliteBackend {
    fn find_with<R: Resource>(&self, conn: &Connection, id: i64) -> StorageResult<Option<R>> {
        let columns = select_columns::<R>();
        let sql = format!("{} WHERE id = ?1", select_sql::<R>());
        let value = conn
            .query_row(&sql, params![id], |row| read_row(row, columns.len()))
            .optional()
            .map_err(|e| query_error(format!("Failed to read {}", R::NAME), e))?;

        value.map(|v| to_record::<R>(&columns, v)).transpose()
    }

    /// Runs field validation plus the checks only the database can answer.
    fn check<R: Resource>(&self, conn: &Connection, attrs: &Attributes) -> StorageResult<Validated> {
        let mut validated = validation::validate::<R>(attrs);
        let mut dangling = Vec::new();

        for (column, value) in &validated.values {
            let (ColumnKind::Reference { table, association }, ColumnValue::Integer(Some(id))) =
                (column.kind, value)
            else {
                continue;
            };
            let exists: bool = conn
                .query_row(
                    &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table),
                    params![id],
                    |row| row.get(0),
                )
                .map_err(|e| query_error(format!("Failed to check {}", association), e))?;
            if !exists {
                dangling.push(association);
            }
        }

        for association in dangling {
            validated.errors.add(association, validation::MUST_EXIST);
        }

        Ok(validated)
    }
}

/// Errors reported when a write trips a foreign key after validation passed.
fn dangling_reference_errors<R: Resource>() -> FieldErrors {
    let mut errors = FieldErrors::new();
    for column in R::COLUMNS {
        if let ColumnKind::Reference { association, .. } = column.kind {
            errors.add(association, validation::MUST_EXIST);
        }
    }
    errors
}

#[async_trait]
impl RecordStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn list<R: Resource>(&self) -> StorageResult<Vec<R>> {
        let conn = self.get_connection()?;
        let columns = select_columns::<R>();
        let sql = format!("{} ORDER BY id", select_sql::<R>());

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| query_error("Failed to prepare list query", e))?;
        let rows = stmt
            .query_map([], |row| read_row(row, columns.len()))
            .map_err(|e| query_error(format!("Failed to list {}", R::TABLE), e))?;

        let mut records = Vec::new();
        for row in rows {
            let values =
                row.map_err(|e| query_error(format!("Failed to read {} row", R::NAME), e))?;
            records.push(to_record::<R>(&columns, values)?);
        }

        Ok(records)
    }

    async fn find<R: Resource>(&self, id: i64) -> StorageResult<Option<R>> {
        let conn = self.get_connection()?;
        self.find_with::<R>(&conn, id)
    }

    async fn create<R: Resource>(&self, attrs: &Attributes) -> StorageResult<R> {
        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| query_error("Failed to begin transaction", e))?;

        let validated = self.check::<R>(&tx, attrs)?;
        if !validated.is_valid() {
            return Err(rejected(validated.errors));
        }

        let now = timestamp();
        let mut names: Vec<&str> = validated.values.iter().map(|(c, _)| c.name).collect();
        names.push("created_at");
        names.push("updated_at");
        let mut values: Vec<SqlValue> = validated.values.iter().map(|(_, v)| to_sql(v)).collect();
        values.push(SqlValue::Text(now.clone()));
        values.push(SqlValue::Text(now));

        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            names.join(", "),
            placeholders.join(", ")
        );

        tx.execute(&sql, params_from_iter(values)).map_err(|e| {
            if is_foreign_key_violation(&e) {
                rejected(dangling_reference_errors::<R>())
            } else {
                query_error(format!("Failed to insert {}", R::NAME), e)
            }
        })?;

        let id = tx.last_insert_rowid();
        let record = self
            .find_with::<R>(&tx, id)?
            .ok_or_else(|| internal_error(format!("{} {} vanished after insert", R::NAME, id)))?;

        tx.commit()
            .map_err(|e| query_error("Failed to commit transaction", e))?;

        tracing::debug!(resource = R::NAME, id, "Created record");
        Ok(record)
    }

    async fn update<R: Resource>(&self, current: &R, attrs: &Attributes) -> StorageResult<R> {
        let id = current.id();
        let mut merged = match serde_json::to_value(current) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(serialization_error(format!(
                    "{} did not serialize to an object",
                    R::NAME
                )));
            }
            Err(e) => {
                return Err(serialization_error(format!(
                    "Failed to encode {}: {}",
                    R::NAME,
                    e
                )));
            }
        };
        for name in R::permitted_fields() {
            if let Some(value) = attrs.get(name) {
                merged.insert(name.to_string(), value.clone());
            }
        }

        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| query_error("Failed to begin transaction", e))?;

        let validated = self.check::<R>(&tx, &merged)?;
        if !validated.is_valid() {
            return Err(rejected(validated.errors));
        }

        let assignments: Vec<String> = validated
            .values
            .iter()
            .enumerate()
            .map(|(i, (c, _))| format!("{} = ?{}", c.name, i + 1))
            .collect();
        let n = validated.values.len();
        let sql = format!(
            "UPDATE {} SET {}, updated_at = ?{} WHERE id = ?{}",
            R::TABLE,
            assignments.join(", "),
            n + 1,
            n + 2
        );

        let mut values: Vec<SqlValue> = validated.values.iter().map(|(_, v)| to_sql(v)).collect();
        values.push(SqlValue::Text(timestamp()));
        values.push(SqlValue::Integer(id));

        let rows = tx.execute(&sql, params_from_iter(values)).map_err(|e| {
            if is_foreign_key_violation(&e) {
                rejected(dangling_reference_errors::<R>())
            } else {
                query_error(format!("Failed to update {}", R::NAME), e)
            }
        })?;
        if rows == 0 {
            return Err(not_found::<R>(id));
        }

        let record = self
            .find_with::<R>(&tx, id)?
            .ok_or_else(|| not_found::<R>(id))?;

        tx.commit()
            .map_err(|e| query_error("Failed to commit transaction", e))?;

        tracing::debug!(resource = R::NAME, id, "Updated record");
        Ok(record)
    }

    async fn delete<R: Resource>(&self, id: i64) -> StorageResult<()> {
        let conn = self.get_connection()?;

        let rows = conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1", R::TABLE), params![id])
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    let dependents = if R::DEPENDENTS.is_empty() {
                        "records".to_string()
                    } else {
                        R::DEPENDENTS.join(" and ")
                    };
                    let mut errors = FieldErrors::new();
                    errors.add(
                        "base",
                        format!("Cannot delete record because dependent {} exist", dependents),
                    );
                    rejected(errors)
                } else {
                    query_error(format!("Failed to delete {}", R::NAME), e)
                }
            })?;

        if rows == 0 {
            return Err(not_found::<R>(id));
        }

        tracing::debug!(resource = R::NAME, id, "Deleted record");
        Ok(())
    }

    async fn count<R: Resource>(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", R::TABLE), [], |row| {
                row.get(0)
            })
            .map_err(|e| query_error(format!("Failed to count {}", R::TABLE), e))?;

        Ok(count as u64)
    }
}
