#![forbid(unsafe_code)]

use std::path::PathBuf;
use tlr_core::TargetKind;

#[derive(Debug)]
pub enum StoreError {
    Sql(rusqlite::Error),
    InvalidInput(&'static str),
    DatabaseNotFound(PathBuf),
    MissingTable(&'static str),
    ProjectNotFound { name: String },
    UnknownId { table: &'static str, id: i64 },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::DatabaseNotFound(path) => {
                write!(f, "database not found: {}", path.display())
            }
            Self::MissingTable(table) => write!(f, "required table is missing: {table}"),
            Self::ProjectNotFound { name } => write!(f, "project node was not found: {name}"),
            Self::UnknownId { table, id } => write!(f, "unknown id (table={table}, id={id})"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sql(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

/// First failed candidate of an apply batch. Candidates before `index` stay written.
#[derive(Debug)]
pub struct ApplyError {
    pub index: usize,
    pub applied: usize,
    pub target_id: i64,
    pub kind: TargetKind,
    pub source: StoreError,
}

impl std::fmt::Display for ApplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "apply failed at candidate {} ({} id={}, {} already applied): {}",
            self.index + 1,
            self.kind.as_str(),
            self.target_id,
            self.applied,
            self.source
        )
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
