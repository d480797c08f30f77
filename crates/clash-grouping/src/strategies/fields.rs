use clash_core::constants::UNSPECIFIED;
use clash_core::errors::ClashResult;
use clash_core::models::{ClashRecord, GroupingMode};

use super::{KeyStrategy, ResolvedKey};
use crate::ancestors::AncestorResolver;

fn field_key(value: Option<&str>) -> Option<ResolvedKey> {
    value.filter(|v| !v.is_empty()).map(ResolvedKey::named)
}

/// Groups by the reviewer who approved the clash.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApprovedByStrategy;

impl KeyStrategy for ApprovedByStrategy {
    fn mode(&self) -> GroupingMode {
        GroupingMode::ApprovedBy
    }

    fn fallback_name(&self) -> &'static str {
        UNSPECIFIED
    }

    fn classify(&self, record: &ClashRecord, _: &AncestorResolver<'_>) -> ClashResult<Option<ResolvedKey>> {
        Ok(field_key(record.approved_by.as_deref()))
    }
}

/// Groups by the assignee.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssignedToStrategy;

impl KeyStrategy for AssignedToStrategy {
    fn mode(&self) -> GroupingMode {
        GroupingMode::AssignedTo
    }

    fn fallback_name(&self) -> &'static str {
        UNSPECIFIED
    }

    fn classify(&self, record: &ClashRecord, _: &AncestorResolver<'_>) -> ClashResult<Option<ResolvedKey>> {
        Ok(field_key(record.assigned_to.as_deref()))
    }
}

/// Groups by review status, named after the status.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusStrategy;

impl KeyStrategy for StatusStrategy {
    fn mode(&self) -> GroupingMode {
        GroupingMode::Status
    }

    fn fallback_name(&self) -> &'static str {
        UNSPECIFIED
    }

    fn classify(&self, record: &ClashRecord, _: &AncestorResolver<'_>) -> ClashResult<Option<ResolvedKey>> {
        Ok(Some(ResolvedKey::named(record.status.as_str())))
    }
}
