//! Transactional apply: progress, cancellation, rollback.

use std::sync::Arc;

use clash_core::config::GroupingConfig;
use clash_core::errors::{ApplyError, ClashError};
use clash_core::models::{GroupingMode, GroupingRequest, OperationOutcome};
use clash_core::traits::IClashDocument;
use clash_grouping::{CancellationToken, GroupingEngine, ProgressReporter};
use test_fixtures::{InMemoryDocument, RecordingProgress, Scenario};

fn setup() -> (GroupingEngine, InMemoryDocument) {
    let scenario = Scenario::load("mep_coordination");
    let engine = GroupingEngine::new(Arc::new(scenario.model_tree()), None, GroupingConfig::default());
    (engine, InMemoryDocument::new([scenario.test()]))
}

fn status_request() -> GroupingRequest {
    GroupingRequest::by(GroupingMode::Status)
}

#[test]
fn progress_counts_every_append() {
    let (engine, document) = setup();
    let id = document.test_ids()[0];
    let sink = Arc::new(RecordingProgress::new());
    let progress = ProgressReporter::new(CancellationToken::new()).with_sink(sink.clone());

    engine.group_test(&document, &id, status_request(), &progress).unwrap();

    // One group ("New") and three loose records.
    assert_eq!(sink.updates(), vec![0.25, 0.5, 0.75, 1.0]);
    assert_eq!(sink.ended(), 1);
    let begun = sink.begun();
    assert_eq!(begun[0].0, "Copying Results");
    assert!(begun[0].1.contains("MEP vs Structure"));
    assert_eq!(document.committed_transactions(), 1);
    assert_eq!(document.open_transactions(), 0);
}

#[test]
fn cancellation_restores_the_original_structure() {
    let (engine, document) = setup();
    let id = document.test_ids()[0];
    let before = document.test(0).fingerprint();
    let sink = Arc::new(RecordingProgress::cancelling_after(2));
    let progress = ProgressReporter::new(CancellationToken::new()).with_sink(sink.clone());

    let report = engine.group_test(&document, &id, status_request(), &progress).unwrap();

    assert_eq!(report.outcome, OperationOutcome::RolledBack);
    assert_eq!(document.test(0).fingerprint(), before);
    assert_eq!(sink.updates().len(), 2);
    // Finalize still runs.
    assert_eq!(sink.ended(), 1);
    assert_eq!(document.committed_transactions(), 1);
}

#[test]
fn cancellation_after_the_last_append_still_rolls_back() {
    let (engine, document) = setup();
    let id = document.test_ids()[0];
    let before = document.test(0).fingerprint();
    let sink = Arc::new(RecordingProgress::cancelling_after(4));
    let progress = ProgressReporter::new(CancellationToken::new()).with_sink(sink);

    let report = engine.group_test(&document, &id, status_request(), &progress).unwrap();

    assert_eq!(report.outcome, OperationOutcome::RolledBack);
    assert_eq!(document.test(0).fingerprint(), before);
}

#[test]
fn pre_cancelled_token_appends_nothing() {
    let (engine, document) = setup();
    let id = document.test_ids()[0];
    let before = document.test(0).fingerprint();
    let token = CancellationToken::new();
    token.cancel();

    let report = engine
        .group_test(&document, &id, status_request(), &ProgressReporter::new(token))
        .unwrap();

    assert_eq!(report.outcome, OperationOutcome::RolledBack);
    assert_eq!(report.leaves_after, report.leaves_before);
    assert_eq!(document.test(0).fingerprint(), before);
}

#[test]
fn append_failure_rolls_back() {
    let (engine, document) = setup();
    let id = document.test_ids()[0];
    let before = document.test(0).fingerprint();
    document.fail_appends_after(1);

    let report = engine
        .group_test(&document, &id, status_request(), &ProgressReporter::silent())
        .unwrap();

    assert_eq!(report.outcome, OperationOutcome::RolledBack);
    assert_eq!(document.test(0).fingerprint(), before);
    assert_eq!(document.open_transactions(), 0);
}

#[test]
fn failed_restore_surfaces_as_rollback_failure() {
    let (engine, document) = setup();
    let id = document.test_ids()[0];
    document.fail_appends_after(0);
    document.fail_restores();

    let err = engine
        .group_test(&document, &id, status_request(), &ProgressReporter::silent())
        .unwrap_err();

    assert!(matches!(err, ClashError::ApplyError(ApplyError::RollbackFailed { .. })));
    assert_eq!(document.open_transactions(), 0);
    assert!(!engine.is_running());
}

#[test]
fn callback_sees_the_same_fractions() {
    let (engine, document) = setup();
    let id = document.test_ids()[0];
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let progress = ProgressReporter::silent().with_callback(move |f| sink.lock().unwrap().push(f));

    engine.ungroup_test(&document, &id, &progress).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 6);
    assert_eq!(seen.last(), Some(&1.0));
}

#[test]
fn concurrent_run_is_rejected() {
    let (engine, document) = setup();
    let id = document.test_ids()[0];
    let before = document.test(0).fingerprint();
    let _held = engine.gate().try_acquire().unwrap();

    let err = engine
        .group_test(&document, &id, status_request(), &ProgressReporter::silent())
        .unwrap_err();

    assert!(matches!(err, ClashError::OperationInProgress));
    assert_eq!(document.test(0).fingerprint(), before);
}

#[test]
fn unknown_test_is_reported() {
    let (engine, document) = setup();
    let stray = clash_core::models::NodeId::new();
    let err = engine
        .ungroup_test(&document, &stray, &ProgressReporter::silent())
        .unwrap_err();
    assert!(matches!(err, ClashError::TestNotFound { .. }));
}
