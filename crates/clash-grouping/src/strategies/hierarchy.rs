//! Strategies keyed on the host model tree.

use clash_core::constants::{
    EMPTY_CLASH, PAIR_SEPARATOR, UNKNOWN_FILE, UNKNOWN_FIRST, UNKNOWN_SECOND, UNNAMED_ELEMENT,
    UNNAMED_MODEL, UNNAMED_PARENT,
};
use clash_core::errors::ClashResult;
use clash_core::models::{ClashRecord, ClashSide, GroupingMode};

use super::{non_empty, GroupOrdering, KeyStrategy, ResolvedKey, UnresolvedPolicy};
use crate::ancestors::AncestorResolver;

/// Groups by the significant ancestor of one side, falling back to the
/// other side when that one is empty.
#[derive(Debug, Clone, Copy)]
pub struct SelectionStrategy {
    side: ClashSide,
}

impl SelectionStrategy {
    pub fn new(side: ClashSide) -> Self {
        Self { side }
    }
}

impl KeyStrategy for SelectionStrategy {
    fn mode(&self) -> GroupingMode {
        match self.side {
            ClashSide::A => GroupingMode::SelectionA,
            ClashSide::B => GroupingMode::SelectionB,
        }
    }

    fn fallback_name(&self) -> &'static str {
        EMPTY_CLASH
    }

    fn unresolved_policy(&self) -> UnresolvedPolicy {
        UnresolvedPolicy::Exempt
    }

    fn classify(&self, record: &ClashRecord, resolver: &AncestorResolver<'_>) -> ClashResult<Option<ResolvedKey>> {
        let Some(element) = record.element_or_other(self.side) else {
            return Ok(None);
        };
        let ancestor = resolver.significant_ancestor_or_self(element)?;
        let tree = resolver.tree();

        // Unnamed composites borrow their parent's name.
        let mut name = tree.display_name(&ancestor)?;
        if name.is_empty() {
            if let Some(parent) = tree.parent(&ancestor)? {
                name = tree.display_name(&parent)?;
            }
        }
        Ok(Some(ResolvedKey::element(ancestor, non_empty(name, UNNAMED_PARENT))))
    }
}

/// Groups by the file ancestor of one side, falling back to the other side.
#[derive(Debug, Clone, Copy)]
pub struct ModelStrategy {
    side: ClashSide,
}

impl ModelStrategy {
    pub fn new(side: ClashSide) -> Self {
        Self { side }
    }
}

impl KeyStrategy for ModelStrategy {
    fn mode(&self) -> GroupingMode {
        match self.side {
            ClashSide::A => GroupingMode::ModelA,
            ClashSide::B => GroupingMode::ModelB,
        }
    }

    fn fallback_name(&self) -> &'static str {
        EMPTY_CLASH
    }

    fn unresolved_policy(&self) -> UnresolvedPolicy {
        UnresolvedPolicy::Exempt
    }

    fn classify(&self, record: &ClashRecord, resolver: &AncestorResolver<'_>) -> ClashResult<Option<ResolvedKey>> {
        let Some(element) = record.element_or_other(self.side) else {
            return Ok(None);
        };
        let file = resolver.file_ancestor_or_self(element)?;
        let name = resolver.tree().display_name(&file)?;
        Ok(Some(ResolvedKey::element(file, non_empty(name, UNNAMED_MODEL))))
    }
}

/// Groups by source file name: the file of A, else of B.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileStrategy;

impl KeyStrategy for FileStrategy {
    fn mode(&self) -> GroupingMode {
        GroupingMode::File
    }

    fn fallback_name(&self) -> &'static str {
        UNKNOWN_FILE
    }

    fn ordering(&self) -> GroupOrdering {
        GroupOrdering::DisplayName
    }

    fn classify(&self, record: &ClashRecord, resolver: &AncestorResolver<'_>) -> ClashResult<Option<ResolvedKey>> {
        let Some(element) = record.element_or_other(ClashSide::A) else {
            return Ok(None);
        };
        let file = resolver.file_ancestor_or_self(element)?;
        let name = resolver.tree().display_name(&file)?;
        Ok((!name.is_empty()).then(|| ResolvedKey::named(name)))
    }
}

/// `First` / `Last`: the significant ancestor of A or of B, with no
/// fallback to the other side.
#[derive(Debug, Clone, Copy)]
pub struct ElementStrategy {
    side: ClashSide,
}

impl ElementStrategy {
    pub fn first() -> Self {
        Self { side: ClashSide::A }
    }

    pub fn last() -> Self {
        Self { side: ClashSide::B }
    }
}

impl KeyStrategy for ElementStrategy {
    fn mode(&self) -> GroupingMode {
        match self.side {
            ClashSide::A => GroupingMode::First,
            ClashSide::B => GroupingMode::Last,
        }
    }

    fn fallback_name(&self) -> &'static str {
        EMPTY_CLASH
    }

    fn ordering(&self) -> GroupOrdering {
        GroupOrdering::DisplayName
    }

    fn classify(&self, record: &ClashRecord, resolver: &AncestorResolver<'_>) -> ClashResult<Option<ResolvedKey>> {
        let Some(element) = record.element(self.side) else {
            return Ok(None);
        };
        let ancestor = resolver.significant_ancestor_or_self(element)?;
        let name = resolver.tree().display_name(&ancestor)?;
        Ok(Some(ResolvedKey::named(non_empty(name, UNNAMED_ELEMENT))))
    }
}

/// `"<A> vs <B>"` over both significant ancestors. Never unresolved: a
/// missing or failing side is named `Unknown1` / `Unknown2`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LastUniqueStrategy;

impl LastUniqueStrategy {
    fn side_name(
        record: &ClashRecord,
        side: ClashSide,
        resolver: &AncestorResolver<'_>,
        unknown: &str,
    ) -> String {
        let resolved = record.element(side).map(|element| -> ClashResult<String> {
            let ancestor = resolver.significant_ancestor_or_self(element)?;
            resolver.tree().display_name(&ancestor)
        });
        match resolved {
            Some(Ok(name)) => non_empty(name, unknown),
            Some(Err(err)) => {
                tracing::debug!(source_id = %record.source_id, ?side, error = %err, "pair side unresolved");
                unknown.to_string()
            }
            None => unknown.to_string(),
        }
    }
}

impl KeyStrategy for LastUniqueStrategy {
    fn mode(&self) -> GroupingMode {
        GroupingMode::LastUnique
    }

    fn fallback_name(&self) -> &'static str {
        EMPTY_CLASH
    }

    fn ordering(&self) -> GroupOrdering {
        GroupOrdering::DisplayName
    }

    fn classify(&self, record: &ClashRecord, resolver: &AncestorResolver<'_>) -> ClashResult<Option<ResolvedKey>> {
        let first = Self::side_name(record, ClashSide::A, resolver, UNKNOWN_FIRST);
        let second = Self::side_name(record, ClashSide::B, resolver, UNKNOWN_SECOND);
        Ok(Some(ResolvedKey::named(format!("{first}{PAIR_SEPARATOR}{second}"))))
    }
}
