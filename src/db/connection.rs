use rusqlite::Connection;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ServerError;

// Thread-local connection slot, tagged with the path it was opened for.
thread_local! {
    static DB_CONN: RefCell<Option<(PathBuf, Connection)>> = RefCell::new(None);
}

#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Provides this thread's connection to the closure, opening it on first
    /// use (or when the thread last talked to a different database file).
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                let stale = !matches!(&*slot, Some((path, _)) if *path == self.path);
                if stale {
                    let conn = open(&self.path)?;
                    *slot = Some((self.path.clone(), conn));
                }
                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(ServerError::InternalError),
                }
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

fn open(path: &Path) -> Result<Connection, ServerError> {
    let conn = Connection::open(path)
        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| ServerError::DbError(format!("Enable foreign keys failed: {e}")))?;
    tracing::debug!(path = %path.display(), "opened sqlite connection");
    Ok(conn)
}

/// Initialize database from a SQL schema file
pub fn init_db(db: &Database, schema_path: impl AsRef<Path>) -> Result<(), ServerError> {
    apply_sql_file(db, schema_path.as_ref())?;
    tracing::info!(
        db = %db.path().display(),
        schema = %schema_path.as_ref().display(),
        "database initialized"
    );
    Ok(())
}

/// Run every statement in a SQL file (schema or seed data).
pub fn apply_sql_file(db: &Database, path: &Path) -> Result<(), ServerError> {
    let sql = fs::read_to_string(path).map_err(|e| {
        ServerError::DbError(format!("Failed to read SQL file {}: {e}", path.display()))
    })?;

    db.with_conn(|conn| {
        conn.execute_batch(&sql)
            .map_err(|e| ServerError::DbError(format!("Failed to apply {}: {e}", path.display())))
    })
}
