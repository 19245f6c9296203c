#![forbid(unsafe_code)]

mod apply;
mod error;
mod hierarchy;
mod settings;
mod testcases;

pub use apply::ApplyReport;
pub use error::{ApplyError, StoreError};
pub use settings::{ConnectionSettings, DEFAULT_DATABASE, DEFAULT_USER};

use rusqlite::{Connection, OpenFlags};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

const REQUIRED_TABLES: [&str; 3] = ["nodes_hierarchy", "tcversions", "tcsteps"];

/// Handle on a TestLink database. The schema is not owned here: tables are
/// expected to exist and nothing is created or migrated.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    pub fn open(settings: &ConnectionSettings) -> Result<Self, StoreError> {
        let Some(db_path) = settings.resolve_path() else {
            return Err(StoreError::DatabaseNotFound(PathBuf::from(
                settings.database.trim(),
            )));
        };
        let conn = Connection::open_with_flags(
            &db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::debug!(path = %db_path.display(), user = %settings.user, "opened database");
        Self::with_connection(conn, Some(db_path))
    }

    /// Wraps an already open connection (in-memory databases, tests).
    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        Self::with_connection(conn, None)
    }

    fn with_connection(conn: Connection, db_path: Option<PathBuf>) -> Result<Self, StoreError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        preflight_gate(&conn)?;
        Ok(Self { conn, db_path })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Closes the connection, reporting a close failure instead of dropping it.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, err)| StoreError::Sql(err))
    }
}

fn preflight_gate(conn: &Connection) -> Result<(), StoreError> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%'",
    )?;
    let mut rows = stmt.query([])?;
    let mut tables = BTreeSet::new();
    while let Some(row) = rows.next()? {
        tables.insert(row.get::<_, String>(0)?);
    }

    for table in REQUIRED_TABLES {
        if !tables.contains(table) {
            return Err(StoreError::MissingTable(table));
        }
    }
    Ok(())
}
