#![forbid(unsafe_code)]

use super::types::Field;
use crate::model::TestCase;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: Field,
    /// Step number for step-level fields.
    pub step: Option<i64>,
    pub occurrences: usize,
    /// Full field text the occurrences were counted in.
    pub text: String,
}

/// Where `search` occurs inside one test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchReport {
    pub testcase_id: i64,
    pub external_id: i64,
    pub matches: Vec<FieldMatch>,
}

impl MatchReport {
    pub fn occurrences(&self) -> usize {
        self.matches.iter().map(|m| m.occurrences).sum()
    }
}

/// Search-only pass: counts non-overlapping occurrences per field.
/// Test cases without any occurrence are left out.
pub fn find_matches(testcases: &[TestCase], search: &str) -> Vec<MatchReport> {
    if search.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    for testcase in testcases {
        let mut matches = Vec::new();
        let mut record = |field, step, text: &str| {
            let occurrences = text.matches(search).count();
            if occurrences > 0 {
                matches.push(FieldMatch {
                    field,
                    step,
                    occurrences,
                    text: text.to_string(),
                });
            }
        };

        record(Field::Summary, None, &testcase.summary);
        record(Field::Preconditions, None, &testcase.preconditions);
        for step in &testcase.steps {
            record(Field::Action, Some(step.number), &step.action);
            record(Field::ExpectedResult, Some(step.number), &step.expected);
        }

        if !matches.is_empty() {
            out.push(MatchReport {
                testcase_id: testcase.id,
                external_id: testcase.external_id,
                matches,
            });
        }
    }
    out
}
