#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "testlink";
pub const DEFAULT_USER: &str = "root";

/// Where and as whom to open the TestLink database.
///
/// SQLite files carry no authentication, so `user` and `password` are kept
/// for the operator's record only. The password never appears in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            user: DEFAULT_USER.to_string(),
            password: String::new(),
        }
    }
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

impl ConnectionSettings {
    /// `database` as given if it exists, else `<database>.db` when the name has
    /// no extension. `None` when neither file exists.
    pub fn resolve_path(&self) -> Option<PathBuf> {
        let raw = Path::new(self.database.trim());
        if raw.as_os_str().is_empty() {
            return None;
        }
        if raw.is_file() {
            return Some(raw.to_path_buf());
        }
        if raw.extension().is_none() {
            let with_ext = raw.with_extension("db");
            if with_ext.is_file() {
                return Some(with_ext);
            }
        }
        None
    }
}
