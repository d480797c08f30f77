//! Batch coordination: worker offload, gate, notification suspension.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use clash_core::config::GroupingConfig;
use clash_core::errors::ClashError;
use clash_core::models::{GroupingMode, GroupingRequest, NodeId, OperationOutcome, TargetResult};
use clash_core::traits::{ChangeListener, IChangeNotifier, IClashDocument};
use clash_grouping::{GroupingCoordinator, GroupingEngine, ProgressReporter};
use test_fixtures::{flat_test, record, InMemoryDocument, Scenario};

struct Harness {
    document: Arc<InMemoryDocument>,
    coordinator: GroupingCoordinator,
    events: Arc<AtomicUsize>,
}

fn harness() -> Harness {
    let scenario = Scenario::load("mep_coordination");
    let engine = Arc::new(GroupingEngine::new(
        Arc::new(scenario.model_tree()),
        None,
        GroupingConfig::default(),
    ));
    let document = Arc::new(InMemoryDocument::new([
        scenario.test(),
        flat_test("Second", [record("x1"), record("x2")]),
    ]));
    let events = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&events);
    let listener: ChangeListener = Arc::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let coordinator = GroupingCoordinator::new(engine, document.clone())
        .with_change_listener(document.clone() as Arc<dyn IChangeNotifier>, listener);
    Harness {
        document,
        coordinator,
        events,
    }
}

#[tokio::test]
async fn batch_groups_every_target() {
    let h = harness();
    let ids = h.document.test_ids();

    let report = h
        .coordinator
        .group_tests(&ids, GroupingRequest::by(GroupingMode::File), &ProgressReporter::silent())
        .await
        .unwrap();

    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.failed_count(), 0);
    let outcomes: Vec<OperationOutcome> = report.completed().map(|r| r.outcome).collect();
    assert_eq!(outcomes, [OperationOutcome::Applied, OperationOutcome::Applied]);
    assert_eq!(h.document.test(0).groups().count(), 2);
    // No element references: both records fall back to "Unknown File".
    assert_eq!(h.document.test(1).groups().next().unwrap().display_name, "Unknown File");
}

#[tokio::test]
async fn listener_is_suspended_during_and_restored_after() {
    let h = harness();
    let ids = h.document.test_ids();
    assert_eq!(h.document.listener_count(), 1);

    h.coordinator
        .ungroup_tests(&ids, &ProgressReporter::silent())
        .await
        .unwrap();

    assert_eq!(h.events.load(Ordering::SeqCst), 0);
    assert_eq!(h.document.listener_count(), 1);

    // Outside a batch the listener sees changes again.
    h.document.begin_transaction("manual").unwrap();
    h.document.commit_transaction().unwrap();
    assert_eq!(h.events.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failing_target_does_not_stop_the_batch() {
    let h = harness();
    let mut ids = vec![NodeId::new()];
    ids.extend(h.document.test_ids());

    let report = h
        .coordinator
        .group_tests(&ids, GroupingRequest::by(GroupingMode::Status), &ProgressReporter::silent())
        .await
        .unwrap();

    assert_eq!(report.failed_count(), 1);
    assert!(matches!(report.entries[0].result, TargetResult::Failed { .. }));
    assert_eq!(report.completed().count(), 2);
    assert_eq!(h.document.listener_count(), 1);
    assert!(!h.coordinator.is_running());
}

#[tokio::test]
async fn listener_restored_after_rollback_failure() {
    let h = harness();
    let ids = h.document.test_ids();
    h.document.fail_appends_after(0);
    h.document.fail_restores();

    let report = h
        .coordinator
        .ungroup_tests(&ids[..1], &ProgressReporter::silent())
        .await
        .unwrap();

    assert_eq!(report.failed_count(), 1);
    assert_eq!(h.document.listener_count(), 1);
}

#[tokio::test]
async fn concurrent_batch_is_rejected() {
    let h = harness();
    let ids = h.document.test_ids();
    let _held = h.coordinator.engine().gate().try_acquire().unwrap();

    let err = h
        .coordinator
        .ungroup_tests(&ids, &ProgressReporter::silent())
        .await
        .unwrap_err();

    assert!(matches!(err, ClashError::OperationInProgress));
    // A rejected call never touches the subscription.
    assert_eq!(h.document.listener_count(), 1);
}

#[tokio::test]
async fn empty_selection_is_a_no_op() {
    let h = harness();
    let report = h
        .coordinator
        .ungroup_tests(&[], &ProgressReporter::silent())
        .await
        .unwrap();
    assert!(report.entries.is_empty());
}
