#![forbid(unsafe_code)]

use super::types::{ChangeCandidate, ChangeTarget, Field, FieldChange, ReplacePair};
use crate::model::{Step, TestCase};

/// Diffs every test case against `pair` and returns the pending changes.
///
/// One candidate per test case whose summary and/or preconditions change, and
/// one per step whose action and/or expected result change. A test case's own
/// candidate precedes its step candidates, which follow step order.
pub fn generate_candidates(testcases: &[TestCase], pair: &ReplacePair) -> Vec<ChangeCandidate> {
    let mut out = Vec::new();
    for testcase in testcases {
        let changes = collect_changes(pair, Field::TESTCASE_FIELDS, |field| match field {
            Field::Preconditions => testcase.preconditions.as_str(),
            _ => testcase.summary.as_str(),
        });
        let target = ChangeTarget::TestCase {
            id: testcase.id,
            external_id: testcase.external_id,
        };
        push_candidate(&mut out, target, changes);

        for step in &testcase.steps {
            push_step_candidate(&mut out, testcase, step, pair);
        }
    }
    out
}

fn push_step_candidate(
    out: &mut Vec<ChangeCandidate>,
    testcase: &TestCase,
    step: &Step,
    pair: &ReplacePair,
) {
    let changes = collect_changes(pair, Field::STEP_FIELDS, |field| match field {
        Field::ExpectedResult => step.expected.as_str(),
        _ => step.action.as_str(),
    });
    let target = ChangeTarget::Step {
        id: step.id,
        number: step.number,
        testcase_id: testcase.id,
        external_id: testcase.external_id,
    };
    push_candidate(out, target, changes);
}

fn collect_changes<'a>(
    pair: &ReplacePair,
    fields: [Field; 2],
    text_of: impl Fn(Field) -> &'a str,
) -> Vec<FieldChange> {
    fields
        .into_iter()
        .filter_map(|field| {
            let old = text_of(field);
            let new = pair.apply(old)?;
            Some(FieldChange {
                field,
                old: old.to_string(),
                new,
            })
        })
        .collect()
}

/// `changes` come from one of the per-kind field lists, each field at most once.
fn push_candidate(out: &mut Vec<ChangeCandidate>, target: ChangeTarget, changes: Vec<FieldChange>) {
    if !changes.is_empty() {
        out.push(ChangeCandidate::from_parts(target, changes));
    }
}
