#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError};
use rusqlite::{Transaction, params};
use tlr_core::{HierarchyNode, NodeType, Step, TestCase};

impl SqliteStore {
    /// Loads the live version of every given leaf node plus its ordered steps.
    ///
    /// The live version is the highest `version` per external id among the
    /// leaf's version records. All reads share one transaction; on error
    /// nothing is returned.
    pub fn load_testcases(&mut self, leaves: &[HierarchyNode]) -> Result<Vec<TestCase>, StoreError> {
        let tx = self.conn.transaction()?;
        let mut out = Vec::with_capacity(leaves.len());

        for leaf in leaves {
            if !leaf.is_testcase() {
                return Err(StoreError::InvalidInput("node is not a test case"));
            }
            for mut testcase in latest_versions_tx(&tx, leaf.id)? {
                testcase.steps = steps_tx(&tx, testcase.id)?;
                out.push(testcase);
            }
        }

        tx.commit()?;
        tracing::debug!(leaves = leaves.len(), testcases = out.len(), "loaded test cases");
        Ok(out)
    }
}

fn latest_versions_tx(tx: &Transaction<'_>, leaf_id: i64) -> Result<Vec<TestCase>, StoreError> {
    let mut stmt = tx.prepare_cached(
        r#"
        SELECT tv.id, leaf.id, leaf.name, tv.tc_external_id, tv.version, tv.summary, tv.preconditions
        FROM nodes_hierarchy leaf
        JOIN nodes_hierarchy vn ON vn.parent_id = leaf.id
        JOIN tcversions tv ON tv.id = vn.id
        WHERE leaf.id = ?1
          AND tv.version = (
            SELECT MAX(tv2.version)
            FROM nodes_hierarchy vn2
            JOIN tcversions tv2 ON tv2.id = vn2.id
            WHERE vn2.parent_id = leaf.id
              AND tv2.tc_external_id = tv.tc_external_id
          )
        ORDER BY tv.tc_external_id ASC, tv.id ASC
        "#,
    )?;
    let mut rows = stmt.query(params![leaf_id])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(TestCase {
            id: row.get(0)?,
            node_id: row.get(1)?,
            name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            external_id: row.get(3)?,
            version: row.get(4)?,
            summary: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            preconditions: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            steps: Vec::new(),
        });
    }
    Ok(out)
}

fn steps_tx(tx: &Transaction<'_>, version_id: i64) -> Result<Vec<Step>, StoreError> {
    let mut stmt = tx.prepare_cached(
        r#"
        SELECT s.id, s.step_number, s.actions, s.expected_results
        FROM nodes_hierarchy nh
        JOIN tcsteps s ON s.id = nh.id
        WHERE nh.parent_id = ?1 AND nh.node_type_id = ?2
        ORDER BY s.step_number ASC, s.id ASC
        "#,
    )?;
    let mut rows = stmt.query(params![version_id, NodeType::Step.as_i64()])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(Step {
            id: row.get(0)?,
            number: row.get(1)?,
            action: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            expected: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        });
    }
    Ok(out)
}
