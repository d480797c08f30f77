//! Phase 4 (Collapse): Singleton groups dissolve into loose records.

use clash_core::models::{ClashRecord, CollapsedContext};

use super::phase2_grouping::BuiltGroup;

/// A record emitted outside any group, with the context of the group it
/// would otherwise have been placed in.
#[derive(Debug, Clone)]
pub struct UngroupedRecord {
    pub record: ClashRecord,
    pub context: Option<String>,
}

impl UngroupedRecord {
    pub fn loose(record: ClashRecord) -> Self {
        Self { record, context: None }
    }

    pub fn collapsed_context(&self) -> Option<CollapsedContext> {
        self.context.as_ref().map(|context| CollapsedContext {
            source_id: self.record.source_id.clone(),
            context: context.clone(),
        })
    }
}

/// Split `groups` into groups with at least two members and the records
/// of the singletons. The group name is not written onto the record.
pub fn collapse_singletons(groups: Vec<BuiltGroup>) -> (Vec<BuiltGroup>, Vec<UngroupedRecord>) {
    let mut kept = Vec::with_capacity(groups.len());
    let mut ungrouped = Vec::new();

    for mut group in groups {
        if group.records.len() == 1 {
            if let Some(record) = group.records.pop() {
                ungrouped.push(UngroupedRecord {
                    record,
                    context: Some(group.context),
                });
            }
        } else if !group.records.is_empty() {
            kept.push(group);
        }
    }
    (kept, ungrouped)
}
