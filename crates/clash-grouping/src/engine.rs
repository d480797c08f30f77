//! GroupingEngine: owns the strategy registry and the single-operation gate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clash_core::config::GroupingConfig;
use clash_core::errors::{ClashError, ClashResult};
use clash_core::models::{
    ClashTest, GroupingMode, GroupingRequest, NodeId, OperationKind, OperationOutcome,
    OperationReport, SkipReason,
};
use clash_core::traits::{IClashDocument, IGridSystem, IModelTree};
use tracing::{info, warn};

use crate::ancestors::AncestorResolver;
use crate::pipeline::{self, ApplyOutcome, ApplySettings, GroupingPlan};
use crate::progress::ProgressReporter;
use crate::strategies::StrategyRegistry;

/// Only one grouping operation may run at a time.
#[derive(Debug, Clone, Default)]
pub struct OperationGate {
    busy: Arc<AtomicBool>,
}

impl OperationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the gate, or fail with `OperationInProgress` if it is held.
    pub fn try_acquire(&self) -> ClashResult<OperationPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ClashError::OperationInProgress)?;
        Ok(OperationPermit {
            busy: Arc::clone(&self.busy),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Relaxed)
    }
}

/// Releases the gate on drop, including on early return and panic.
#[derive(Debug)]
pub struct OperationPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for OperationPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

/// What to do with a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Group(GroupingRequest),
    Ungroup,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Group(_) => OperationKind::Group,
            Self::Ungroup => OperationKind::Ungroup,
        }
    }
}

/// A target snapshot that passed the no-op checks.
#[derive(Debug, Clone)]
pub struct PreparedTarget {
    pub test_id: NodeId,
    pub test: ClashTest,
    /// Normalized; a `Group` here always selects a first mode.
    pub operation: Operation,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum Preparation {
    Ready(PreparedTarget),
    Skipped(OperationReport),
}

/// The grouping engine.
///
/// Runs the pipeline for one target at a time: [`prepare`](Self::prepare)
/// snapshots the target, [`plan`](Self::plan) runs the read-only phases and
/// [`commit`](Self::commit) applies the result. [`run`](Self::run) does all
/// three under the operation gate.
pub struct GroupingEngine {
    registry: StrategyRegistry,
    tree: Arc<dyn IModelTree>,
    config: GroupingConfig,
    gate: OperationGate,
}

impl GroupingEngine {
    /// Engine with every built-in strategy.
    pub fn new(
        tree: Arc<dyn IModelTree>,
        grid: Option<Arc<dyn IGridSystem>>,
        config: GroupingConfig,
    ) -> Self {
        Self::with_registry(tree, StrategyRegistry::with_builtins(grid), config)
    }

    pub fn with_registry(
        tree: Arc<dyn IModelTree>,
        registry: StrategyRegistry,
        config: GroupingConfig,
    ) -> Self {
        Self {
            registry,
            tree,
            config,
            gate: OperationGate::new(),
        }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn config(&self) -> &GroupingConfig {
        &self.config
    }

    pub fn gate(&self) -> &OperationGate {
        &self.gate
    }

    pub fn is_running(&self) -> bool {
        self.gate.is_busy()
    }

    /// Modes a user can pick, `None` first.
    pub fn available_modes(&self) -> Vec<GroupingMode> {
        self.registry.available_modes()
    }

    /// Request preselected by configuration.
    pub fn default_request(&self) -> GroupingRequest {
        GroupingRequest::new(
            self.config.default_group_by,
            self.config.default_then_by,
            self.config.keep_existing_groups,
        )
    }

    pub fn group_test(
        &self,
        document: &dyn IClashDocument,
        test_id: &NodeId,
        request: GroupingRequest,
        progress: &ProgressReporter,
    ) -> ClashResult<OperationReport> {
        self.run(document, test_id, Operation::Group(request), progress)
    }

    pub fn ungroup_test(
        &self,
        document: &dyn IClashDocument,
        test_id: &NodeId,
        progress: &ProgressReporter,
    ) -> ClashResult<OperationReport> {
        self.run(document, test_id, Operation::Ungroup, progress)
    }

    /// Prepare, plan and commit one target under the operation gate.
    pub fn run(
        &self,
        document: &dyn IClashDocument,
        test_id: &NodeId,
        operation: Operation,
        progress: &ProgressReporter,
    ) -> ClashResult<OperationReport> {
        let _permit = self.gate.try_acquire()?;
        match self.prepare(document, test_id, operation)? {
            Preparation::Skipped(report) => Ok(report),
            Preparation::Ready(target) => {
                let plan = self.plan(&target)?;
                self.commit(document, &target, plan, progress)
            }
        }
    }

    /// Snapshot the target and resolve no-op cases.
    pub fn prepare(
        &self,
        document: &dyn IClashDocument,
        test_id: &NodeId,
        operation: Operation,
    ) -> ClashResult<Preparation> {
        let started_at = Utc::now();
        let index = find(document, test_id)?;
        let test = document.read_test(index)?;
        let kind = operation.kind();

        let skip = |reason: SkipReason, test: &ClashTest| {
            warn!(test = %test.display_name, ?reason, "skipping clash test");
            Preparation::Skipped(OperationReport::skipped(
                *test_id,
                test.display_name.clone(),
                kind,
                reason,
                test.leaf_count(),
                started_at,
            ))
        };

        let operation = match operation {
            Operation::Group(request) => match request.normalized() {
                Some(request) => Operation::Group(request),
                None => return Ok(skip(SkipReason::NoModeSelected, &test)),
            },
            Operation::Ungroup => Operation::Ungroup,
        };
        if test.is_empty() {
            return Ok(skip(SkipReason::EmptyTest, &test));
        }

        Ok(Preparation::Ready(PreparedTarget {
            test_id: *test_id,
            test,
            operation,
            started_at,
        }))
    }

    /// Run the read-only phases on a prepared snapshot.
    pub fn plan(&self, target: &PreparedTarget) -> ClashResult<GroupingPlan> {
        match &target.operation {
            Operation::Group(request) => {
                let resolver =
                    AncestorResolver::new(self.tree.as_ref(), self.config.max_hierarchy_depth);
                pipeline::build_grouping_plan(
                    &target.test,
                    request,
                    &self.registry,
                    &resolver,
                    self.config.parallel_threshold,
                )
            }
            Operation::Ungroup => Ok(pipeline::build_ungrouping_plan(&target.test)),
        }
    }

    /// Apply `plan` to the live target and report.
    pub fn commit(
        &self,
        document: &dyn IClashDocument,
        target: &PreparedTarget,
        plan: GroupingPlan,
        progress: &ProgressReporter,
    ) -> ClashResult<OperationReport> {
        let index = find(document, &target.test_id)?;
        let leaves_before = target.test.leaf_count();
        let groups_created = plan.groups_created();
        let groups_preserved = plan.preserved;
        let ungrouped = plan.ungrouped.len();
        let collapsed = plan.collapsed();

        let settings = ApplySettings {
            transaction_label: &self.config.transaction_label,
            progress_title: &self.config.progress_title,
        };
        let applied = pipeline::phase6_apply::apply_plan(document, index, plan, progress, &settings)?;
        let leaves_after = document.read_test(index)?.leaf_count();

        let outcome = match applied {
            ApplyOutcome::Committed { .. } => OperationOutcome::Applied,
            ApplyOutcome::RolledBack { .. } => OperationOutcome::RolledBack,
        };
        if leaves_after != leaves_before {
            warn!(leaves_before, leaves_after, "leaf count changed");
        }
        info!(
            test = %target.test.display_name,
            kind = ?target.operation.kind(),
            ?outcome,
            groups_created,
            groups_preserved,
            ungrouped,
            "clash test updated"
        );

        Ok(OperationReport {
            test_id: target.test_id,
            test_name: target.test.display_name.clone(),
            kind: target.operation.kind(),
            outcome,
            groups_created,
            groups_preserved,
            ungrouped,
            leaves_before,
            leaves_after,
            collapsed,
            started_at: target.started_at,
            finished_at: Utc::now(),
        })
    }
}

fn find(document: &dyn IClashDocument, test_id: &NodeId) -> ClashResult<usize> {
    document
        .find_test(test_id)
        .ok_or_else(|| ClashError::TestNotFound {
            id: test_id.to_string(),
        })
}
