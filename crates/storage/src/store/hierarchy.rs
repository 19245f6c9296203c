#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::BTreeSet;
use tlr_core::{HierarchyNode, NodeType};

impl SqliteStore {
    /// Resolves a project name to its root node.
    ///
    /// Names are not unique in `nodes_hierarchy`; a node tagged as a project
    /// wins over other nodes with the same name, then the lowest id.
    pub fn find_project(&self, name: &str) -> Result<HierarchyNode, StoreError> {
        let node = self
            .conn
            .query_row(
                "SELECT id, name, parent_id, node_type_id FROM nodes_hierarchy \
                 WHERE name=?1 \
                 ORDER BY CASE WHEN node_type_id=?2 THEN 0 ELSE 1 END, id ASC \
                 LIMIT 1",
                params![name, NodeType::Project.as_i64()],
                node_from_row,
            )
            .optional()?;

        let node = node.ok_or_else(|| StoreError::ProjectNotFound {
            name: name.to_string(),
        })?;
        tracing::debug!(id = node.id, kind = node.node_type.as_str(), "found project node");
        Ok(node)
    }

    /// Collects every leaf test case node below `root_id`.
    ///
    /// Containers are expanded, test cases collected, anything else skipped.
    /// Result is in ascending id order.
    pub fn collect_testcase_nodes(&self, root_id: i64) -> Result<Vec<HierarchyNode>, StoreError> {
        let mut stack = vec![root_id];
        let mut expanded = BTreeSet::new();
        let mut out = Vec::new();

        while let Some(parent_id) = stack.pop() {
            if !expanded.insert(parent_id) {
                continue;
            }
            for node in children(&self.conn, parent_id)? {
                if node.is_container() {
                    stack.push(node.id);
                } else if node.is_testcase() {
                    out.push(node);
                } else {
                    tracing::trace!(id = node.id, kind = node.node_type.as_str(), "skipped node");
                }
            }
        }

        out.sort_by_key(|node| node.id);
        out.dedup_by_key(|node| node.id);
        tracing::debug!(root_id, leaves = out.len(), "walked hierarchy");
        Ok(out)
    }
}

fn children(conn: &Connection, parent_id: i64) -> Result<Vec<HierarchyNode>, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, parent_id, node_type_id FROM nodes_hierarchy \
         WHERE parent_id=?1 \
         ORDER BY id ASC",
    )?;
    let mut rows = stmt.query(params![parent_id])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(node_from_row(row)?);
    }
    Ok(out)
}

fn node_from_row(row: &Row<'_>) -> rusqlite::Result<HierarchyNode> {
    Ok(HierarchyNode {
        id: row.get(0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        parent_id: row.get(2)?,
        node_type: NodeType::from_i64(row.get(3)?),
    })
}
