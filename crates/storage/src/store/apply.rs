#![forbid(unsafe_code)]

use super::{ApplyError, SqliteStore, StoreError};
use rusqlite::params;
use tlr_core::{ChangeCandidate, Field, TargetKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub candidates: usize,
    pub fields: usize,
}

impl SqliteStore {
    /// Writes candidates in order and stops at the first failure.
    ///
    /// Each candidate's fields are written together; the batch is not.
    /// Candidates before the failing one remain written, later ones are
    /// never attempted.
    pub fn apply_candidates(
        &mut self,
        candidates: &[ChangeCandidate],
    ) -> Result<ApplyReport, ApplyError> {
        let mut report = ApplyReport::default();
        for (index, candidate) in candidates.iter().enumerate() {
            match self.apply_candidate(candidate) {
                Ok(fields) => {
                    report.candidates += 1;
                    report.fields += fields;
                }
                Err(source) => {
                    tracing::error!(
                        index,
                        target_id = candidate.target_id(),
                        kind = candidate.kind().as_str(),
                        error = %source,
                        "apply failed"
                    );
                    return Err(ApplyError {
                        index,
                        applied: report.candidates,
                        target_id: candidate.target_id(),
                        kind: candidate.kind(),
                        source,
                    });
                }
            }
        }
        Ok(report)
    }

    pub fn apply_candidate(&mut self, candidate: &ChangeCandidate) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let (table, target_id) = (table_for(candidate.kind()), candidate.target_id());

        for change in candidate.changes() {
            let statement = update_statement(candidate.kind(), change.field)?;
            let updated = tx.execute(statement, params![change.new, target_id])?;
            if updated == 0 {
                return Err(StoreError::UnknownId {
                    table,
                    id: target_id,
                });
            }
            tracing::trace!(target_id, table, field = change.field.key(), "updated field");
        }

        tx.commit()?;
        tracing::debug!(
            target_id,
            table,
            fields = candidate.changes().len(),
            "applied candidate"
        );
        Ok(candidate.changes().len())
    }
}

fn table_for(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::TestCase => "tcversions",
        TargetKind::Step => "tcsteps",
    }
}

fn update_statement(kind: TargetKind, field: Field) -> Result<&'static str, StoreError> {
    match (kind, field) {
        (TargetKind::TestCase, Field::Summary) => {
            Ok("UPDATE tcversions SET summary=?1 WHERE id=?2")
        }
        (TargetKind::TestCase, Field::Preconditions) => {
            Ok("UPDATE tcversions SET preconditions=?1 WHERE id=?2")
        }
        (TargetKind::Step, Field::Action) => Ok("UPDATE tcsteps SET actions=?1 WHERE id=?2"),
        (TargetKind::Step, Field::ExpectedResult) => {
            Ok("UPDATE tcsteps SET expected_results=?1 WHERE id=?2")
        }
        _ => Err(StoreError::InvalidInput("field does not belong to target kind")),
    }
}
