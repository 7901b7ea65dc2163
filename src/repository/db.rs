//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::domain::{StorageError, StorageResult};
use crate::error::AppResult;

/// SQLite implementation of list and task storage.
///
/// The connection is synchronous; every query runs on the blocking pool.
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Open (or create) the database at `db_path` and run migrations
    pub async fn open(db_path: &Path) -> AppResult<Self> {
        let db_path = db_path.to_path_buf();
        let conn = tokio::task::spawn_blocking(move || open_connection(&db_path)).await??;
        Ok(Self::new(conn))
    }

    /// Run `f` against the connection on the blocking pool
    pub(super) async fn run<T, F>(&self, f: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| {
                log::error!("SQLite connection mutex poisoned");
                StorageError::InternalError
            })?;
            f(&guard)
        })
        .await
        .map_err(|e| {
            log::error!("SQLite task failed: {}", e);
            StorageError::InternalError
        })?
    }
}

/// Map a SQLite failure to the storage error of the operation it broke
pub(super) fn db_error(kind: StorageError) -> impl Fn(rusqlite::Error) -> StorageError {
    move |e| {
        log::warn!("SQLite error ({}): {}", kind, e);
        kind
    }
}

/// Open a connection with foreign keys enabled and the schema migrated
pub fn open_connection(db_path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    run_migrations(&conn)?;
    log::info!("Database ready at {}", db_path.display());
    Ok(conn)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS lists (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY NOT NULL,
            list_id TEXT NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            is_done INTEGER NOT NULL DEFAULT 0
        );",
    )?;

    // Ordering columns came after the first schema
    if !column_exists(conn, "lists", "position")? {
        conn.execute(
            "ALTER TABLE lists ADD COLUMN position INTEGER NOT NULL DEFAULT 0",
            [],
        )?;
    }

    if !column_exists(conn, "tasks", "position")? {
        conn.execute(
            "ALTER TABLE tasks ADD COLUMN position INTEGER NOT NULL DEFAULT 0",
            [],
        )?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_list ON tasks(list_id, position)",
        [],
    )?;

    Ok(())
}
