//! Opening and configuring the single SQLite connection.

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

/// Runtime tunables for SQLite connection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// Busy timeout for the connection, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
        }
    }
}

/// Errors that can occur when opening a connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The database could not be opened or initialised.
    #[error("failed to open database connection: {0}")]
    Open(#[from] rusqlite::Error),
}

/// Opens a SQLite connection by name with foreign keys enforced.
///
/// # Arguments
///
/// * `db_name` - Path to the SQLite database file. Use `:memory:` for an
///   in-memory database (useful for testing).
///
/// # Errors
///
/// Returns `ConnectionError::Open` if the file cannot be opened or the
/// connection pragmas cannot be applied.
pub fn open_connection(
    db_name: &str,
    settings: DbRuntimeSettings,
) -> Result<Connection, ConnectionError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;

    let conn = Connection::open_with_flags(db_name, flags)?;

    // Without this pragma SQLite silently ignores `REFERENCES lists (id)`.
    conn.execute_batch(&format!(
        "PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = {};",
        settings.busy_timeout_ms
    ))?;

    tracing::debug!(
        db_name,
        busy_timeout_ms = settings.busy_timeout_ms,
        "opened database connection"
    );

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_in_memory_connection() {
        let settings = DbRuntimeSettings {
            busy_timeout_ms: 2_500,
        };

        let conn = open_connection(":memory:", settings).expect("connection should open");

        let fk: i32 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .expect("should query foreign_keys");
        assert_eq!(fk, 1, "foreign keys should be enabled");

        let busy_timeout: i32 = conn
            .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
            .expect("should query busy_timeout");
        assert_eq!(busy_timeout, 2_500, "busy timeout should match settings");
    }

    #[test]
    fn open_file_connection_creates_database() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("todos.db");
        let path_str = path.to_str().expect("temp path should be utf-8");

        let conn = open_connection(path_str, DbRuntimeSettings::default())
            .expect("file connection should open");
        conn.execute_batch("CREATE TABLE scratch (id INTEGER PRIMARY KEY);")
            .expect("should write to the new database");

        assert!(path.exists(), "database file should be created on open");
    }

    #[test]
    fn open_fails_for_missing_directory() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("missing").join("todos.db");
        let path_str = path.to_str().expect("temp path should be utf-8");

        let err = open_connection(path_str, DbRuntimeSettings::default())
            .expect_err("opening inside a missing directory should fail");
        assert!(matches!(err, ConnectionError::Open(_)));
    }
}
