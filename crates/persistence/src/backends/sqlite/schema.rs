//! SQLite schema definitions and migrations.
//!
//! Migrations are numbered from 1 and applied in order, each inside its own
//! transaction. The last applied number is kept in `schema_version`.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 3;

/// Initialize the database schema, applying any pending migrations.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version < SCHEMA_VERSION {
        tracing::info!(
            from = current_version,
            to = SCHEMA_VERSION,
            "Migrating SQLite schema"
        );
        migrate_schema(conn, current_version)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(StorageError::Backend(BackendError::MigrationError {
            version: current_version,
            message: format!(
                "database schema is newer than this build supports ({})",
                SCHEMA_VERSION
            ),
        }));
    }

    Ok(())
}

/// Get the current schema version.
pub(crate) fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    // Create version table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| internal(format!("Failed to create schema_version table: {}", e)))?;

    let version: Option<i32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .map_err(|e| internal(format!("Failed to read schema_version: {}", e)))?;

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| internal(format!("Failed to clear schema_version: {}", e)))?;

    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])
        .map_err(|e| internal(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Run schema migrations from current version to latest.
fn migrate_schema(conn: &Connection, from_version: i32) -> StorageResult<()> {
    let mut version = from_version;

    while version < SCHEMA_VERSION {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| internal(format!("Failed to begin migration: {}", e)))?;

        let step = match version {
            0 => create_patients(&tx),
            1 => create_doctors(&tx),
            2 => add_doctor_to_patients(&tx),
            _ => {
                return Err(internal(format!("Unknown schema version: {}", version)));
            }
        };
        step.map_err(|e| {
            StorageError::Backend(BackendError::MigrationError {
                version: version + 1,
                message: e.to_string(),
            })
        })?;

        version += 1;
        set_schema_version(&tx, version)?;
        tx.commit()
            .map_err(|e| internal(format!("Failed to commit migration: {}", e)))?;
        tracing::debug!(version, "Applied schema migration");
    }

    Ok(())
}

/// Migration 1: the `patients` table.
fn create_patients(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS patients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            given_name TEXT,
            surname TEXT,
            born_on TEXT,
            gender TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )
}

/// Migration 2: the `doctors` table.
fn create_doctors(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS doctors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            given_name TEXT,
            surname TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )
}

/// Migration 3: `patients.doctor_id` referencing `doctors`.
///
/// No `ON DELETE` action, so a doctor with patients cannot be removed while
/// foreign keys are enforced.
fn add_doctor_to_patients(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "ALTER TABLE patients ADD COLUMN doctor_id INTEGER REFERENCES doctors(id);
         CREATE INDEX IF NOT EXISTS index_patients_on_doctor_id ON patients(doctor_id);",
    )
}

/// Drop all tables (for testing).
#[cfg(test)]
pub fn drop_all_tables(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS patients;
         DROP TABLE IF EXISTS doctors;
         DROP TABLE IF EXISTS schema_version;",
    )
    .map_err(|e| internal(format!("Failed to drop tables: {}", e)))
}

fn internal(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    }

    fn column_names(conn: &Connection, table: &str) -> Vec<String> {
        conn.prepare(&format!("PRAGMA table_info({})", table))
            .unwrap()
            .query_map([], |row| row.get(1))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    }

    #[test]
    fn test_schema_initialization() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let tables = table_names(&conn);
        assert!(tables.contains(&"doctors".to_string()));
        assert!(tables.contains(&"patients".to_string()));
        assert!(tables.contains(&"schema_version".to_string()));

        let columns = column_names(&conn, "patients");
        for name in ["id", "given_name", "surname", "born_on", "gender", "doctor_id"] {
            assert!(columns.contains(&name.to_string()), "missing {}", name);
        }
    }

    #[test]
    fn test_schema_version() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        // Initialize twice - should not fail
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_upgrade_from_first_migration_keeps_rows() {
        let conn = Connection::open_in_memory().unwrap();
        get_schema_version(&conn).unwrap();
        create_patients(&conn).unwrap();
        set_schema_version(&conn, 1).unwrap();
        conn.execute(
            "INSERT INTO patients (given_name, surname, created_at, updated_at)
             VALUES ('Bob', 'Marley', '2020-01-01T00:00:00Z', '2020-01-01T00:00:00Z')",
            [],
        )
        .unwrap();

        initialize_schema(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(column_names(&conn, "patients").contains(&"doctor_id".to_string()));
        let doctor_id: Option<i64> = conn
            .query_row("SELECT doctor_id FROM patients WHERE surname = 'Marley'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(doctor_id, None);
    }

    #[test]
    fn test_rejects_newer_schema() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        set_schema_version(&conn, SCHEMA_VERSION + 1).unwrap();

        let err = initialize_schema(&conn).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Backend(BackendError::MigrationError { .. })
        ));
    }

    #[test]
    fn test_drop_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        drop_all_tables(&conn).unwrap();

        assert!(table_names(&conn).iter().all(|t| t == "sqlite_sequence"));
        initialize_schema(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }
}
