use super::*;
use crate::model::{Step, TestCase};

fn testcase(id: i64, summary: &str, preconditions: &str, steps: Vec<Step>) -> TestCase {
    TestCase {
        id,
        node_id: id - 1,
        name: format!("TC {id}"),
        external_id: id * 10,
        version: 1,
        summary: summary.to_string(),
        preconditions: preconditions.to_string(),
        steps,
    }
}

fn step(id: i64, number: i64, action: &str, expected: &str) -> Step {
    Step {
        id,
        number,
        action: action.to_string(),
        expected: expected.to_string(),
    }
}

fn pair(search: &str, replace: &str) -> ReplacePair {
    ReplacePair::try_new(search, replace).expect("valid pair")
}

#[test]
fn empty_search_is_rejected() {
    assert_eq!(
        ReplacePair::try_new("", "bar").unwrap_err(),
        ReplacePairError::EmptySearch
    );
    assert!(ReplacePair::try_new("foo", "").is_ok());
}

#[test]
fn summary_only_change_yields_single_testcase_candidate() {
    let tcs = vec![testcase(
        2,
        "foo test",
        "nothing here",
        vec![step(5, 1, "open app", "app opens")],
    )];

    let out = generate_candidates(&tcs, &pair("foo", "bar"));

    assert_eq!(out.len(), 1);
    let candidate = &out[0];
    assert_eq!(candidate.kind(), TargetKind::TestCase);
    assert_eq!(candidate.target_id(), 2);
    assert_eq!(candidate.text(Field::Summary), Some("bar test"));
    assert_eq!(candidate.text(Field::Preconditions), None);
    assert_eq!(candidate.fields().collect::<Vec<_>>(), vec![Field::Summary]);
}

#[test]
fn all_occurrences_in_step_action_are_replaced() {
    let tcs = vec![testcase(
        2,
        "summary",
        "",
        vec![step(7, 1, "click foo button, then foo again", "done")],
    )];

    let out = generate_candidates(&tcs, &pair("foo", "bar"));

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].kind(), TargetKind::Step);
    assert_eq!(out[0].target_id(), 7);
    assert_eq!(
        out[0].text(Field::Action),
        Some("click bar button, then bar again")
    );
    assert_eq!(out[0].text(Field::ExpectedResult), None);
}

#[test]
fn both_testcase_fields_share_one_candidate() {
    let tcs = vec![testcase(2, "foo summary", "needs foo", vec![])];

    let out = generate_candidates(&tcs, &pair("foo", "bar"));

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].text(Field::Summary), Some("bar summary"));
    assert_eq!(out[0].text(Field::Preconditions), Some("needs bar"));
    assert_eq!(out[0].changes()[1].old, "needs foo");
}

#[test]
fn both_step_fields_share_one_candidate() {
    let tcs = vec![testcase(
        2,
        "s",
        "p",
        vec![step(8, 3, "type foo", "foo shown")],
    )];

    let out = generate_candidates(&tcs, &pair("foo", "bar"));

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].text(Field::Action), Some("type bar"));
    assert_eq!(out[0].text(Field::ExpectedResult), Some("bar shown"));
    assert!(matches!(
        out[0].target(),
        ChangeTarget::Step {
            number: 3,
            testcase_id: 2,
            external_id: 20,
            ..
        }
    ));
}

#[test]
fn untouched_steps_produce_no_candidate() {
    let tcs = vec![testcase(
        2,
        "foo",
        "",
        vec![
            step(5, 1, "open", "opens"),
            step(6, 2, "foo", "closes"),
            step(7, 3, "wait", "idle"),
        ],
    )];

    let out = generate_candidates(&tcs, &pair("foo", "bar"));

    let ids = out.iter().map(ChangeCandidate::target_id).collect::<Vec<_>>();
    assert_eq!(ids, vec![2, 6]);
}

#[test]
fn absent_search_string_yields_nothing() {
    let tcs = vec![
        testcase(2, "alpha", "beta", vec![step(5, 1, "gamma", "delta")]),
        testcase(4, "", "", vec![]),
    ];

    assert!(generate_candidates(&tcs, &pair("foo", "bar")).is_empty());
}

#[test]
fn identical_search_and_replace_changes_nothing() {
    let tcs = vec![testcase(2, "foo", "foo", vec![step(5, 1, "foo", "foo")])];

    assert!(generate_candidates(&tcs, &pair("foo", "foo")).is_empty());
}

#[test]
fn replacement_round_trips_for_disjoint_strings() {
    let summaries = [
        "foo",
        "foofoo",
        "a foo b foo c",
        "prefix-foo",
        "multi\nline foo\n",
    ];
    let tcs = summaries
        .iter()
        .enumerate()
        .map(|(i, s)| testcase(i as i64 + 2, s, "", vec![]))
        .collect::<Vec<_>>();

    let out = generate_candidates(&tcs, &pair("foo", "qux"));
    assert_eq!(out.len(), summaries.len());

    let back = pair("qux", "foo");
    for (candidate, original) in out.iter().zip(summaries) {
        let replaced = candidate.text(Field::Summary).expect("summary changed");
        assert!(!replaced.contains("foo"));
        assert_eq!(back.apply(replaced).as_deref(), Some(original));
    }
}

#[test]
fn candidates_follow_testcase_then_step_order() {
    let tcs = vec![
        testcase(2, "foo", "", vec![step(11, 2, "foo", ""), step(10, 1, "", "foo")]),
        testcase(4, "", "", vec![step(12, 1, "foo", "")]),
    ];

    let out = generate_candidates(&tcs, &pair("foo", "bar"));

    let ids = out.iter().map(ChangeCandidate::target_id).collect::<Vec<_>>();
    assert_eq!(ids, vec![2, 11, 10, 12]);
}

#[test]
fn candidate_validation_guards_field_kinds() {
    let target = ChangeTarget::TestCase {
        id: 1,
        external_id: 1,
    };
    let change = |field| FieldChange {
        field,
        old: "a".to_string(),
        new: "b".to_string(),
    };

    assert_eq!(
        ChangeCandidate::try_new(target, vec![]).unwrap_err(),
        CandidateError::NoChanges
    );
    assert_eq!(
        ChangeCandidate::try_new(target, vec![change(Field::Action)]).unwrap_err(),
        CandidateError::FieldKindMismatch {
            field: Field::Action,
            kind: TargetKind::TestCase,
        }
    );
    assert_eq!(
        ChangeCandidate::try_new(target, vec![change(Field::Summary), change(Field::Summary)])
            .unwrap_err(),
        CandidateError::DuplicateField(Field::Summary)
    );
    assert!(ChangeCandidate::try_new(target, vec![change(Field::Preconditions)]).is_ok());
}

#[test]
fn preconditions_key_is_shared_by_generation_and_apply() {
    assert_eq!(Field::Preconditions.key(), "preconditions");
    assert_eq!(Field::Preconditions.kind(), TargetKind::TestCase);
    assert_eq!(Field::ExpectedResult.kind(), TargetKind::Step);
}

#[test]
fn generated_candidates_pass_validation() {
    let tcs = vec![
        testcase(
            2,
            "foo",
            "foo first",
            vec![step(5, 1, "foo", "foo"), step(6, 2, "x", "foo")],
        ),
        testcase(4, "plain", "foo", vec![step(7, 1, "foo", "y")]),
    ];

    let candidates = generate_candidates(&tcs, &pair("foo", "bar"));

    assert_eq!(candidates.len(), 5);
    for candidate in &candidates {
        let rebuilt = ChangeCandidate::try_new(*candidate.target(), candidate.changes().to_vec())
            .expect("generated candidate is valid");
        assert_eq!(&rebuilt, candidate);
    }
}

#[test]
fn match_report_counts_occurrences_per_field() {
    let tcs = vec![
        testcase(
            2,
            "foo and foo",
            "",
            vec![step(5, 1, "x", "foo"), step(6, 2, "y", "z")],
        ),
        testcase(4, "none", "", vec![]),
    ];

    let reports = find_matches(&tcs, "foo");

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].external_id, 20);
    assert_eq!(reports[0].occurrences(), 3);
    assert_eq!(
        reports[0].matches,
        vec![
            FieldMatch {
                field: Field::Summary,
                step: None,
                occurrences: 2,
                text: "foo and foo".to_string(),
            },
            FieldMatch {
                field: Field::ExpectedResult,
                step: Some(1),
                occurrences: 1,
                text: "foo".to_string(),
            },
        ]
    );
    assert!(find_matches(&tcs, "").is_empty());
}
