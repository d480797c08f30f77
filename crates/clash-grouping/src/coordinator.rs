//! Async batch entry point for host front-ends.

use std::sync::{Arc, Mutex, PoisonError};

use clash_core::errors::{ClashError, ClashResult};
use clash_core::models::{
    BatchReport, GroupingRequest, NodeId, OperationReport, SubscriptionId, TargetResult,
};
use clash_core::traits::{ChangeListener, IChangeNotifier, IClashDocument};
use tracing::{error, info, warn};

use crate::engine::{GroupingEngine, Operation, Preparation};
use crate::progress::ProgressReporter;

/// Runs grouping and ungrouping over several targets per user action.
///
/// The read-only phases of each target run on a blocking worker; the apply
/// phase runs on the calling task, which owns mutation rights on the
/// document. While a batch runs the gate is held and the host change
/// listener (if any) is unsubscribed.
pub struct GroupingCoordinator {
    engine: Arc<GroupingEngine>,
    document: Arc<dyn IClashDocument>,
    notifications: Option<NotificationBinding>,
}

impl GroupingCoordinator {
    pub fn new(engine: Arc<GroupingEngine>, document: Arc<dyn IClashDocument>) -> Self {
        Self {
            engine,
            document,
            notifications: None,
        }
    }

    /// Subscribe `listener` now; it is suspended while batches run.
    pub fn with_change_listener(
        mut self,
        notifier: Arc<dyn IChangeNotifier>,
        listener: ChangeListener,
    ) -> Self {
        self.notifications = Some(NotificationBinding::subscribe(notifier, listener));
        self
    }

    pub fn engine(&self) -> &Arc<GroupingEngine> {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub async fn group_tests(
        &self,
        test_ids: &[NodeId],
        request: GroupingRequest,
        progress: &ProgressReporter,
    ) -> ClashResult<BatchReport> {
        self.run_batch(test_ids, Operation::Group(request), progress).await
    }

    pub async fn ungroup_tests(
        &self,
        test_ids: &[NodeId],
        progress: &ProgressReporter,
    ) -> ClashResult<BatchReport> {
        self.run_batch(test_ids, Operation::Ungroup, progress).await
    }

    async fn run_batch(
        &self,
        test_ids: &[NodeId],
        operation: Operation,
        progress: &ProgressReporter,
    ) -> ClashResult<BatchReport> {
        let _permit = self.engine.gate().try_acquire()?;
        let _suspended = self.notifications.as_ref().map(NotificationBinding::suspend);

        let mut report = BatchReport::default();
        if test_ids.is_empty() {
            warn!("no clash tests selected");
            return Ok(report);
        }

        info!(targets = test_ids.len(), kind = ?operation.kind(), "batch started");
        for test_id in test_ids {
            let result = match self.run_target(test_id, operation, progress).await {
                Ok(outcome) => TargetResult::Completed(outcome),
                Err(err) => {
                    error!(%test_id, error = %err, "clash test failed");
                    TargetResult::Failed {
                        error: err.to_string(),
                    }
                }
            };
            report.push(*test_id, result);
        }
        info!(
            targets = report.entries.len(),
            failed = report.failed_count(),
            "batch finished"
        );
        Ok(report)
    }

    async fn run_target(
        &self,
        test_id: &NodeId,
        operation: Operation,
        progress: &ProgressReporter,
    ) -> ClashResult<OperationReport> {
        let document = self.document.as_ref();
        let target = match self.engine.prepare(document, test_id, operation)? {
            Preparation::Skipped(report) => return Ok(report),
            Preparation::Ready(target) => target,
        };

        let engine = Arc::clone(&self.engine);
        let (target, plan) = tokio::task::spawn_blocking(move || {
            let plan = engine.plan(&target);
            (target, plan)
        })
        .await
        .map_err(|err| ClashError::WorkerFailed(err.to_string()))?;

        self.engine.commit(document, &target, plan?, progress)
    }
}

/// A change listener and its current subscription.
struct NotificationBinding {
    notifier: Arc<dyn IChangeNotifier>,
    listener: ChangeListener,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl NotificationBinding {
    fn subscribe(notifier: Arc<dyn IChangeNotifier>, listener: ChangeListener) -> Self {
        let id = notifier.subscribe(Arc::clone(&listener));
        Self {
            notifier,
            listener,
            subscription: Mutex::new(Some(id)),
        }
    }

    fn suspend(&self) -> SuspendedNotifications<'_> {
        let mut slot = self.subscription.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = slot.take() {
            self.notifier.unsubscribe(id);
        }
        SuspendedNotifications { binding: self }
    }
}

impl Drop for NotificationBinding {
    fn drop(&mut self) {
        let slot = self.subscription.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = slot.take() {
            self.notifier.unsubscribe(id);
        }
    }
}

/// Resubscribes the listener on drop, whatever ended the batch.
struct SuspendedNotifications<'a> {
    binding: &'a NotificationBinding,
}

impl Drop for SuspendedNotifications<'_> {
    fn drop(&mut self) {
        let mut slot = self
            .binding
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(
                self.binding
                    .notifier
                    .subscribe(Arc::clone(&self.binding.listener)),
            );
        }
    }
}
