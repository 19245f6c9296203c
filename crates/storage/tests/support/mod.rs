#![allow(dead_code)]

use rusqlite::{Connection, params};
use std::path::PathBuf;
use tlr_storage::ConnectionSettings;

pub const PROJECT: i64 = 1;
pub const CONTAINER: i64 = 2;
pub const TESTCASE: i64 = 3;
pub const VERSION: i64 = 4;
pub const KEYWORD: i64 = 5;
pub const STEP: i64 = 9;

const TESTLINK_TABLES: &str = r#"
CREATE TABLE nodes_hierarchy (
  id INTEGER PRIMARY KEY,
  name TEXT,
  parent_id INTEGER,
  node_type_id INTEGER NOT NULL DEFAULT 1,
  node_order INTEGER
);

CREATE TABLE tcversions (
  id INTEGER PRIMARY KEY,
  tc_external_id INTEGER,
  version INTEGER NOT NULL DEFAULT 1,
  summary TEXT,
  preconditions TEXT
);

CREATE TABLE tcsteps (
  id INTEGER PRIMARY KEY,
  step_number INTEGER DEFAULT 1,
  actions TEXT,
  expected_results TEXT
);
"#;

pub fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("tlr_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

pub fn create_testlink_tables(conn: &Connection) {
    conn.execute_batch(TESTLINK_TABLES).expect("create tables");
}

/// Creates `<dir>/testlink.db` with the TestLink tables and returns settings
/// pointing at it.
pub fn testlink_db(test_name: &str) -> (ConnectionSettings, Connection) {
    let dir = temp_dir(test_name);
    let path = dir.join("testlink.db");
    let conn = Connection::open(&path).expect("create db");
    create_testlink_tables(&conn);
    let settings = ConnectionSettings {
        database: path.to_string_lossy().into_owned(),
        ..ConnectionSettings::default()
    };
    (settings, conn)
}

pub fn node(conn: &Connection, id: i64, name: &str, parent_id: Option<i64>, node_type: i64) {
    conn.execute(
        "INSERT INTO nodes_hierarchy(id, name, parent_id, node_type_id, node_order) VALUES (?1, ?2, ?3, ?4, 0)",
        params![id, name, parent_id, node_type],
    )
    .expect("insert node");
}

pub fn version(
    conn: &Connection,
    id: i64,
    leaf_id: i64,
    external_id: i64,
    version: i64,
    summary: &str,
    preconditions: &str,
) {
    node(conn, id, "", Some(leaf_id), VERSION);
    conn.execute(
        "INSERT INTO tcversions(id, tc_external_id, version, summary, preconditions) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, external_id, version, summary, preconditions],
    )
    .expect("insert version");
}

pub fn step(conn: &Connection, id: i64, version_id: i64, number: i64, action: &str, expected: &str) {
    node(conn, id, "", Some(version_id), STEP);
    conn.execute(
        "INSERT INTO tcsteps(id, step_number, actions, expected_results) VALUES (?1, ?2, ?3, ?4)",
        params![id, number, action, expected],
    )
    .expect("insert step");
}

/// "Demo" project:
///
/// ```text
/// 1 Demo (project)
/// ├── 2 Suite A
/// │   ├── 3 Login          v1 (id 4, ext 100), v2 (id 5, ext 100) + steps 6, 7
/// │   └── 8 Nested
/// │       └── 9 Logout     v1 (id 10, ext 101) + step 11
/// ├── 12 Smoke             v3 (id 13, ext 102), v1 (id 14, ext 102)
/// └── 15 keyword node
/// 20 Else (project)
/// └── 21 Suite B
///     └── 22 Foreign       v1 (id 23, ext 200)
/// ```
pub fn seed_demo(conn: &Connection) {
    node(conn, 1, "Demo", None, PROJECT);
    node(conn, 2, "Suite A", Some(1), CONTAINER);
    node(conn, 3, "Login", Some(2), TESTCASE);
    version(conn, 4, 3, 100, 1, "old foo summary", "");
    version(conn, 5, 3, 100, 2, "foo test", "needs foo");
    step(conn, 7, 5, 2, "wait", "idle");
    step(conn, 6, 5, 1, "click foo button, then foo again", "foo shown");
    node(conn, 8, "Nested", Some(2), CONTAINER);
    node(conn, 9, "Logout", Some(8), TESTCASE);
    version(conn, 10, 9, 101, 1, "plain", "plain");
    step(conn, 11, 10, 1, "log out", "foo gone");
    node(conn, 12, "Smoke", Some(1), TESTCASE);
    version(conn, 13, 12, 102, 3, "latest foo", "");
    version(conn, 14, 12, 102, 1, "first foo", "");
    node(conn, 15, "foo keyword", Some(1), KEYWORD);

    node(conn, 20, "Else", None, PROJECT);
    node(conn, 21, "Suite B", Some(20), CONTAINER);
    node(conn, 22, "Foreign", Some(21), TESTCASE);
    version(conn, 23, 22, 200, 1, "foo elsewhere", "");
}

pub fn summary_of(conn: &Connection, id: i64) -> String {
    conn.query_row(
        "SELECT summary FROM tcversions WHERE id=?1",
        params![id],
        |row| row.get(0),
    )
    .expect("summary")
}

pub fn preconditions_of(conn: &Connection, id: i64) -> String {
    conn.query_row(
        "SELECT preconditions FROM tcversions WHERE id=?1",
        params![id],
        |row| row.get(0),
    )
    .expect("preconditions")
}

pub fn step_texts(conn: &Connection, id: i64) -> (String, String) {
    conn.query_row(
        "SELECT actions, expected_results FROM tcsteps WHERE id=?1",
        params![id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .expect("step texts")
}
