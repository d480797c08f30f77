//! Phase 3 (Subgrouping): Split every first-pass group by a second mode.

use clash_core::constants::SUBGROUP_SEPARATOR;
use clash_core::models::ClashRecord;

use super::phase2_grouping::{build_groups, BuiltGroup};
use crate::ancestors::AncestorResolver;
use crate::strategies::KeyStrategy;

/// Replace each group with its subgroups, named `<parent>_<name>`.
/// The result is flat: one level, parents dropped.
pub fn expand_subgroups(
    groups: Vec<BuiltGroup>,
    strategy: &dyn KeyStrategy,
    resolver: &AncestorResolver<'_>,
    parallel_threshold: usize,
) -> Vec<BuiltGroup> {
    groups
        .iter()
        .flat_map(|parent| {
            let prefix = format!("{}{SUBGROUP_SEPARATOR}", parent.display_name);
            let members: Vec<&ClashRecord> = parent.records.iter().collect();
            build_groups(&members, strategy, resolver, &prefix, parallel_threshold)
        })
        .collect()
}
