//! Key strategies: one per grouping mode, looked up through the registry.

mod fields;
mod hierarchy;
mod layer;
mod registry;
mod spatial;

use clash_core::errors::ClashResult;
use clash_core::models::{ClashRecord, ElementId, GroupingMode};

use crate::ancestors::AncestorResolver;

pub use fields::{ApprovedByStrategy, AssignedToStrategy, StatusStrategy};
pub use hierarchy::{
    ElementStrategy, FileStrategy, LastUniqueStrategy, ModelStrategy, SelectionStrategy,
};
pub use layer::LayerStrategy;
pub use registry::StrategyRegistry;
pub use spatial::{GridIntersectionStrategy, LevelStrategy};

/// Value whose equality defines group membership, independent of the
/// display name shown for the group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Name(String),
    Element(ElementId),
    GridLevel(String),
    GridIntersection(String),
}

/// Sort position of a spatially keyed group: elevation, then X.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpatialOrder {
    pub elevation: f64,
    pub x: f64,
}

impl SpatialOrder {
    pub fn cmp_total(&self, other: &Self) -> std::cmp::Ordering {
        self.elevation
            .total_cmp(&other.elevation)
            .then(self.x.total_cmp(&other.x))
    }
}

/// A record's resolved key plus the un-prefixed name of its group.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedKey {
    pub key: GroupKey,
    pub name: String,
    pub order: Option<SpatialOrder>,
}

impl ResolvedKey {
    /// Key by name; the common case.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: GroupKey::Name(name.clone()),
            name,
            order: None,
        }
    }

    pub fn element(element: ElementId, name: impl Into<String>) -> Self {
        Self {
            key: GroupKey::Element(element),
            name: name.into(),
            order: None,
        }
    }
}

/// How the groups of one pass are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrdering {
    /// First-seen key order; the fallback group sits where it was first seen.
    #[default]
    Insertion,
    /// By [`SpatialOrder`]; the fallback group trails.
    Spatial,
    /// Lexicographic by final display name, fallback included.
    DisplayName,
}

/// Where unresolved records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
    /// One shared group named after the fallback.
    #[default]
    Merge,
    /// One exempt, un-prefixed group per record, after the keyed groups.
    Exempt,
}

/// Computes the group key of a record for one grouping mode.
///
/// `Ok(None)` means unresolved. Errors are lookup failures; the builder
/// treats both the same way and routes the record to the fallback.
pub trait KeyStrategy: Send + Sync {
    fn mode(&self) -> GroupingMode;

    fn fallback_name(&self) -> &'static str;

    fn ordering(&self) -> GroupOrdering {
        GroupOrdering::Insertion
    }

    fn unresolved_policy(&self) -> UnresolvedPolicy {
        UnresolvedPolicy::Merge
    }

    fn classify(
        &self,
        record: &ClashRecord,
        resolver: &AncestorResolver<'_>,
    ) -> ClashResult<Option<ResolvedKey>>;
}

/// `name`, or `placeholder` when the host reports an empty name.
pub(crate) fn non_empty(name: String, placeholder: &str) -> String {
    if name.is_empty() {
        placeholder.to_string()
    } else {
        name
    }
}
