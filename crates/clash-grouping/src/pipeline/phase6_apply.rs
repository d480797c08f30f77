//! Phase 6 (Apply): Swap the plan into the document, or roll back.
//!
//! Prepare → SwapIn → Populate → Commit | Rollback → Finalize.
//! Finalize (commit the host transaction, end progress) runs whatever
//! happened before it.

use clash_core::errors::{ApplyError, ClashResult};
use clash_core::models::{ClashNode, ClashTest};
use clash_core::traits::IClashDocument;
use tracing::{debug, warn};

use super::GroupingPlan;
use crate::progress::ProgressReporter;

/// Labels shown by the host while applying.
#[derive(Debug, Clone, Copy)]
pub struct ApplySettings<'a> {
    pub transaction_label: &'a str,
    pub progress_title: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackReason {
    Cancelled,
    AppendFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Committed { appended: usize },
    RolledBack { appended: usize, reason: RollbackReason },
}

impl ApplyOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

/// Replace the children of the test at `index` with `plan`.
///
/// Groups go in first, then loose records. On cancellation or a failed
/// append the test is restored from an identity-preserving snapshot.
pub fn apply_plan(
    document: &dyn IClashDocument,
    index: usize,
    plan: GroupingPlan,
    progress: &ProgressReporter,
    settings: &ApplySettings<'_>,
) -> ClashResult<ApplyOutcome> {
    // Prepare.
    let snapshot = document.read_test(index)?;
    let shell = snapshot.create_copy_without_children();

    document.begin_transaction(settings.transaction_label)?;
    progress.begin(
        settings.progress_title,
        &format!("Copying results from {}", snapshot.display_name),
    );

    let result = swap_and_populate(document, index, shell, plan, progress)
        .and_then(|(appended, stop)| settle(document, index, snapshot, appended, stop));

    // Finalize.
    let committed = document.commit_transaction();
    progress.end();
    let outcome = result?;
    committed?;
    Ok(outcome)
}

/// SwapIn + Populate. Returns how many nodes went in and why population
/// stopped early, if it did.
fn swap_and_populate(
    document: &dyn IClashDocument,
    index: usize,
    shell: ClashTest,
    plan: GroupingPlan,
    progress: &ProgressReporter,
) -> ClashResult<(usize, Option<RollbackReason>)> {
    document.replace_test(index, shell)?;

    let total = plan.total_steps();
    let nodes = plan
        .groups
        .into_iter()
        .map(ClashNode::Group)
        .chain(plan.ungrouped.into_iter().map(|u| ClashNode::Record(u.record)));

    let mut appended = 0usize;
    for node in nodes {
        if progress.is_cancelled() {
            return Ok((appended, Some(RollbackReason::Cancelled)));
        }
        if let Err(err) = document.append_child(index, node) {
            return Ok((appended, Some(RollbackReason::AppendFailed(err.to_string()))));
        }
        appended += 1;
        progress.report(appended, total);
    }
    if total == 0 {
        progress.report(0, 0);
    }

    if progress.is_cancelled() {
        return Ok((appended, Some(RollbackReason::Cancelled)));
    }
    Ok((appended, None))
}

/// Commit, or restore `snapshot` into the slot.
fn settle(
    document: &dyn IClashDocument,
    index: usize,
    snapshot: ClashTest,
    appended: usize,
    stop: Option<RollbackReason>,
) -> ClashResult<ApplyOutcome> {
    let Some(reason) = stop else {
        debug!(appended, "populate complete");
        return Ok(ApplyOutcome::Committed { appended });
    };

    warn!(test = %snapshot.display_name, appended, ?reason, "rolling back");
    document
        .replace_test(index, snapshot)
        .map_err(|err| ApplyError::RollbackFailed {
            reason: err.to_string(),
        })?;
    Ok(ApplyOutcome::RolledBack { appended, reason })
}
