//! Property tests for the grouping pipeline: leaf bijection, singleton
//! collapse, determinism, and rollback atomicity.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use clash_core::config::GroupingConfig;
use clash_core::models::{
    ClashRecord, ClashStatus, ClashTest, GroupingMode, GroupingRequest, OperationOutcome,
};
use clash_core::traits::IClashDocument;
use clash_grouping::{CancellationToken, GroupingEngine, ProgressReporter};
use test_fixtures::{clash, flat_test, InMemoryDocument, InMemoryModelTree, RecordingProgress};

const ELEMENTS: [&str; 6] = ["", "d1", "d2", "p1", "p2", "orphan"];
const PEOPLE: [&str; 4] = ["", "ana", "ben", "cleo"];
const STATUSES: [ClashStatus; 5] = [
    ClashStatus::New,
    ClashStatus::Active,
    ClashStatus::Reviewed,
    ClashStatus::Approved,
    ClashStatus::Resolved,
];
const MODES: [GroupingMode; 13] = [
    GroupingMode::None,
    GroupingMode::SelectionA,
    GroupingMode::SelectionB,
    GroupingMode::ModelA,
    GroupingMode::ModelB,
    GroupingMode::AssignedTo,
    GroupingMode::ApprovedBy,
    GroupingMode::Status,
    GroupingMode::File,
    GroupingMode::Layer,
    GroupingMode::First,
    GroupingMode::Last,
    GroupingMode::LastUnique,
];

fn tree() -> InMemoryModelTree {
    InMemoryModelTree::new()
        .file("duct", "Duct.rvt")
        .composite("run", "Run", "duct")
        .element("d1", "D1", "run")
        .element("d2", "D2", "duct")
        .file("pipe", "Pipe.rvt")
        .composite("loop", "", "pipe")
        .element("p1", "P1", "loop")
        .element("p2", "P2", "loop")
        .property("run", "Item", "Layer", "M-DUCT")
        .property("loop", "Item", "Layer", "P-PIPE")
        .failing("orphan")
}

fn engine() -> GroupingEngine {
    let config = GroupingConfig {
        parallel_threshold: 8,
        ..GroupingConfig::default()
    };
    GroupingEngine::new(Arc::new(tree()), None, config)
}

fn make_test(specs: &[(usize, usize, usize, usize, usize)]) -> ClashTest {
    let records: Vec<ClashRecord> = specs
        .iter()
        .enumerate()
        .map(|(i, &(a, b, status, assignee, approver))| {
            let mut record = clash(&format!("c{i}"), ELEMENTS[a], ELEMENTS[b]).with_status(STATUSES[status]);
            if !PEOPLE[assignee].is_empty() {
                record = record.with_assigned_to(PEOPLE[assignee]);
            }
            if !PEOPLE[approver].is_empty() {
                record = record.with_approved_by(PEOPLE[approver]);
            }
            record
        })
        .collect();
    flat_test("Prop", records)
}

fn specs() -> impl Strategy<Value = Vec<(usize, usize, usize, usize, usize)>> {
    prop::collection::vec((0..6usize, 0..6usize, 0..5usize, 0..4usize, 0..4usize), 1..40)
}

fn mode() -> impl Strategy<Value = GroupingMode> {
    prop::sample::select(MODES.to_vec())
}

/// Group names with the source ids of their members, then loose ids.
fn shape(test: &ClashTest) -> (Vec<(String, Vec<String>)>, Vec<String>) {
    let groups = test
        .groups()
        .map(|g| {
            (
                g.display_name.clone(),
                g.leaves().iter().map(|r| r.source_id.clone()).collect(),
            )
        })
        .collect();
    let loose = test.loose_records().map(|r| r.source_id.clone()).collect();
    (groups, loose)
}

fn group(test: ClashTest, request: GroupingRequest) -> ClashTest {
    let document = InMemoryDocument::new([test]);
    let id = document.test_ids()[0];
    engine()
        .group_test(&document, &id, request, &ProgressReporter::silent())
        .unwrap();
    document.test(0)
}

proptest! {
    #[test]
    fn leaves_are_a_bijection(specs in specs(), first in mode(), second in mode()) {
        let input = make_test(&specs);
        let before = input.leaf_source_ids();
        let request = GroupingRequest::by(first).then(second);
        let after = group(input.clone(), request);

        prop_assert_eq!(after.leaf_source_ids(), before);
        if request.normalized().is_some() {
            // Every leaf is a fresh copy.
            let old: HashSet<_> = input.leaves().iter().map(|r| r.node_id).collect();
            prop_assert!(after.leaves().iter().all(|r| !old.contains(&r.node_id)));
        }
    }

    #[test]
    fn engine_groups_are_flat_and_never_singletons(specs in specs(), first in mode(), second in mode()) {
        let after = group(make_test(&specs), GroupingRequest::by(first).then(second));
        for g in after.groups() {
            prop_assert!(g.len() >= 2, "group {} has {} members", g.display_name, g.len());
            prop_assert!(g.children.iter().all(|c| !c.is_group()));
        }
    }

    #[test]
    fn grouping_is_deterministic(specs in specs(), first in mode(), second in mode()) {
        let input = make_test(&specs);
        let request = GroupingRequest::by(first).then(second);
        let a = group(input.clone(), request);
        let b = group(input, request);
        prop_assert_eq!(shape(&a), shape(&b));
    }

    #[test]
    fn subgroup_names_carry_the_parent_prefix(specs in specs()) {
        let request = GroupingRequest::by(GroupingMode::File).then(GroupingMode::Status);
        let nested = group(make_test(&specs), request);
        for g in nested.groups() {
            let (parent, child) = g.display_name.split_once('_').unwrap();
            prop_assert!(
                ["Duct.rvt", "Pipe.rvt", "Unknown File"].contains(&parent),
                "unexpected parent in {}", g.display_name
            );
            prop_assert!(STATUSES.iter().any(|s| s.as_str() == child));
        }
    }

    #[test]
    fn cancellation_is_atomic(specs in specs(), first in mode(), cancel_after in 0usize..8) {
        let input = make_test(&specs);
        let document = InMemoryDocument::new([input]);
        let id = document.test_ids()[0];
        let before = document.test(0).fingerprint();
        let sink = Arc::new(RecordingProgress::cancelling_after(cancel_after));
        let progress = ProgressReporter::new(CancellationToken::new()).with_sink(sink.clone());

        let report = engine()
            .group_test(&document, &id, GroupingRequest::by(first), &progress)
            .unwrap();

        match report.outcome {
            OperationOutcome::Applied => {
                // Only possible when the plan finished before the threshold.
                prop_assert!(sink.updates().len() < cancel_after);
            }
            OperationOutcome::RolledBack | OperationOutcome::Skipped(_) => {
                prop_assert_eq!(document.test(0).fingerprint(), before);
            }
        }
    }

    #[test]
    fn ungroup_restores_a_flat_test(specs in specs(), first in mode()) {
        let grouped = group(make_test(&specs), GroupingRequest::by(first));
        let expected = grouped.leaf_source_ids();
        let document = InMemoryDocument::new([grouped]);
        let id = document.test_ids()[0];

        engine().ungroup_test(&document, &id, &ProgressReporter::silent()).unwrap();

        let after = document.test(0);
        prop_assert_eq!(after.groups().count(), 0);
        prop_assert_eq!(after.leaf_source_ids(), expected);
    }
}
