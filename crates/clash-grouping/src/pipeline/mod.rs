//! 6-phase grouping pipeline.
//!
//! Phase 1: Flatten → Phase 2: Grouping → Phase 3: Subgrouping →
//! Phase 4: Collapse → Phase 5: Backup → Phase 6: Apply
//!
//! Phases 1–5 only read the target and produce a [`GroupingPlan`]; phase 6
//! is the only one that touches the document.

pub mod phase1_flatten;
pub mod phase2_grouping;
pub mod phase3_subgrouping;
pub mod phase4_collapse;
pub mod phase5_backup;
pub mod phase6_apply;

use clash_core::errors::ClashResult;
use clash_core::models::{ClashGroup, ClashTest, CollapsedContext, GroupingRequest};
use tracing::info;

use crate::ancestors::AncestorResolver;
use crate::strategies::StrategyRegistry;

pub use phase2_grouping::BuiltGroup;
pub use phase4_collapse::UngroupedRecord;
pub use phase6_apply::{ApplyOutcome, ApplySettings, RollbackReason};

/// The new children of a target: groups (new ones first, then preserved
/// backups) followed by loose records.
#[derive(Debug, Clone, Default)]
pub struct GroupingPlan {
    pub groups: Vec<ClashGroup>,
    pub ungrouped: Vec<UngroupedRecord>,
    /// How many trailing entries of `groups` are preserved backups.
    pub preserved: usize,
}

impl GroupingPlan {
    /// Appends the applier will perform.
    pub fn total_steps(&self) -> usize {
        self.groups.len() + self.ungrouped.len()
    }

    pub fn groups_created(&self) -> usize {
        self.groups.len() - self.preserved
    }

    pub fn leaf_count(&self) -> usize {
        self.groups.iter().map(ClashGroup::leaf_count).sum::<usize>() + self.ungrouped.len()
    }

    /// Records that ended up loose because their group had one member.
    pub fn collapsed(&self) -> Vec<CollapsedContext> {
        self.ungrouped
            .iter()
            .filter_map(UngroupedRecord::collapsed_context)
            .collect()
    }
}

/// Run phases 1–5 for a normalized request.
pub fn build_grouping_plan(
    test: &ClashTest,
    request: &GroupingRequest,
    registry: &StrategyRegistry,
    resolver: &AncestorResolver<'_>,
    parallel_threshold: usize,
) -> ClashResult<GroupingPlan> {
    let primary = registry.require(request.group_by)?;
    let secondary = if request.then_by.is_none() {
        None
    } else {
        Some(registry.require(request.then_by)?)
    };

    // Phase 1: Flatten.
    let leaves = phase1_flatten::collect_leaf_records(test, request.keep_existing_groups);
    info!(test = %test.display_name, leaves = leaves.len(), "Phase 1: flattened");

    // Phase 2: Grouping.
    let mut groups = phase2_grouping::build_groups(&leaves, primary, resolver, "", parallel_threshold);
    info!(mode = %request.group_by, groups = groups.len(), "Phase 2: grouped");

    // Phase 3: Subgrouping.
    if let Some(secondary) = secondary {
        groups = phase3_subgrouping::expand_subgroups(groups, secondary, resolver, parallel_threshold);
        info!(mode = %request.then_by, groups = groups.len(), "Phase 3: subgrouped");
    }

    // Phase 4: Collapse.
    let (groups, ungrouped) = phase4_collapse::collapse_singletons(groups);
    info!(groups = groups.len(), ungrouped = ungrouped.len(), "Phase 4: collapsed singletons");

    let mut plan_groups: Vec<ClashGroup> = groups
        .into_iter()
        .map(|group| ClashGroup::with_records(group.display_name, group.records))
        .collect();

    // Phase 5: Backup.
    let mut preserved = 0;
    if request.keep_existing_groups {
        let backups = phase5_backup::backup_existing_groups(test);
        preserved = backups.len();
        plan_groups.extend(backups);
        info!(preserved, "Phase 5: backed up existing groups");
    }

    Ok(GroupingPlan {
        groups: plan_groups,
        ungrouped,
        preserved,
    })
}

/// Every leaf of `test`, copied, as loose records.
pub fn build_ungrouping_plan(test: &ClashTest) -> GroupingPlan {
    let ungrouped: Vec<UngroupedRecord> = phase1_flatten::collect_leaf_records(test, false)
        .into_iter()
        .map(|record| UngroupedRecord::loose(record.create_copy()))
        .collect();
    info!(test = %test.display_name, ungrouped = ungrouped.len(), "ungroup plan built");
    GroupingPlan {
        groups: Vec::new(),
        ungrouped,
        preserved: 0,
    }
}
