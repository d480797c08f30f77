//! Phase 2 (Grouping): Classify records under one strategy.

use std::collections::HashMap;

use clash_core::constants::EMPTY_CLASH;
use clash_core::models::ClashRecord;
use rayon::prelude::*;
use tracing::debug;

use crate::ancestors::AncestorResolver;
use crate::strategies::{
    GroupKey, GroupOrdering, KeyStrategy, ResolvedKey, SpatialOrder, UnresolvedPolicy,
};

/// A group produced by one grouping pass, not yet placed in a document.
#[derive(Debug, Clone)]
pub struct BuiltGroup {
    /// Final name, including any parent prefix.
    pub display_name: String,
    /// Un-prefixed name of the key (or fallback) that produced the group.
    pub context: String,
    /// Unresolved singleton that bypasses keyed merging.
    pub exempt: bool,
    /// Fresh copies of the member records.
    pub records: Vec<ClashRecord>,
}

impl BuiltGroup {
    fn new(prefix: &str, name: &str) -> Self {
        Self {
            display_name: format!("{prefix}{name}"),
            context: name.to_string(),
            exempt: false,
            records: Vec::new(),
        }
    }

    fn exempt(record: ClashRecord) -> Self {
        Self {
            display_name: EMPTY_CLASH.to_string(),
            context: EMPTY_CLASH.to_string(),
            exempt: true,
            records: vec![record],
        }
    }
}

/// Group `records` under `strategy`, naming every keyed group `prefix + name`.
///
/// Keys are resolved in parallel once `records.len()` reaches
/// `parallel_threshold`; assembly is sequential, so the output is the same
/// either way.
pub fn build_groups(
    records: &[&ClashRecord],
    strategy: &dyn KeyStrategy,
    resolver: &AncestorResolver<'_>,
    prefix: &str,
    parallel_threshold: usize,
) -> Vec<BuiltGroup> {
    let keys: Vec<Option<ResolvedKey>> = if records.len() >= parallel_threshold {
        records
            .par_iter()
            .map(|record| resolve(strategy, record, resolver))
            .collect()
    } else {
        records
            .iter()
            .map(|record| resolve(strategy, record, resolver))
            .collect()
    };

    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut keyed: Vec<(BuiltGroup, Option<SpatialOrder>)> = Vec::new();
    let mut trailing: Option<BuiltGroup> = None;
    let mut exempt: Vec<BuiltGroup> = Vec::new();

    let fallback = || ResolvedKey::named(strategy.fallback_name());

    for (record, key) in records.iter().zip(keys) {
        let copy = record.create_copy();
        let resolved = match key {
            Some(resolved) => resolved,
            None => match (strategy.unresolved_policy(), strategy.ordering()) {
                (UnresolvedPolicy::Exempt, _) => {
                    exempt.push(BuiltGroup::exempt(copy));
                    continue;
                }
                (UnresolvedPolicy::Merge, GroupOrdering::Spatial) => {
                    trailing
                        .get_or_insert_with(|| BuiltGroup::new(prefix, strategy.fallback_name()))
                        .records
                        .push(copy);
                    continue;
                }
                (UnresolvedPolicy::Merge, _) => fallback(),
            },
        };

        let slot = *index.entry(resolved.key).or_insert_with(|| {
            keyed.push((BuiltGroup::new(prefix, &resolved.name), resolved.order));
            keyed.len() - 1
        });
        keyed[slot].0.records.push(copy);
    }

    match strategy.ordering() {
        GroupOrdering::Insertion => {}
        GroupOrdering::Spatial => keyed.sort_by(|(_, a), (_, b)| {
            a.unwrap_or_default().cmp_total(&b.unwrap_or_default())
        }),
        GroupOrdering::DisplayName => {
            keyed.sort_by(|(a, _), (b, _)| a.display_name.cmp(&b.display_name))
        }
    }

    let mut groups: Vec<BuiltGroup> = keyed.into_iter().map(|(group, _)| group).collect();
    groups.extend(trailing);
    groups.extend(exempt);
    groups
}

fn resolve(
    strategy: &dyn KeyStrategy,
    record: &ClashRecord,
    resolver: &AncestorResolver<'_>,
) -> Option<ResolvedKey> {
    match strategy.classify(record, resolver) {
        Ok(key) => key,
        Err(err) => {
            debug!(
                mode = %strategy.mode(),
                source_id = %record.source_id,
                error = %err,
                "key lookup failed, using fallback"
            );
            None
        }
    }
}
