use clash_core::constants::{LAYER_PROPERTY_NEEDLE, NO_LAYER};
use clash_core::errors::ClashResult;
use clash_core::models::{ClashRecord, ClashSide, ElementId, GroupingMode};

use super::{GroupOrdering, KeyStrategy, ResolvedKey};
use crate::ancestors::AncestorResolver;

/// Groups by the first non-empty property whose name mentions "layer",
/// searching the significant ancestor of A, then of B.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayerStrategy;

impl LayerStrategy {
    fn layer_of(element: &ElementId, resolver: &AncestorResolver<'_>) -> ClashResult<Option<String>> {
        let ancestor = resolver.significant_ancestor_or_self(element)?;
        let categories = resolver.tree().property_categories(&ancestor)?;
        Ok(categories
            .iter()
            .flat_map(|category| category.properties.iter())
            .filter(|property| property.name.to_lowercase().contains(LAYER_PROPERTY_NEEDLE))
            .map(|property| property.value.to_display_string())
            .find(|value| !value.is_empty()))
    }
}

impl KeyStrategy for LayerStrategy {
    fn mode(&self) -> GroupingMode {
        GroupingMode::Layer
    }

    fn fallback_name(&self) -> &'static str {
        NO_LAYER
    }

    fn ordering(&self) -> GroupOrdering {
        GroupOrdering::DisplayName
    }

    fn classify(&self, record: &ClashRecord, resolver: &AncestorResolver<'_>) -> ClashResult<Option<ResolvedKey>> {
        for side in [ClashSide::A, ClashSide::B] {
            if let Some(element) = record.element(side) {
                if let Some(layer) = Self::layer_of(element, resolver)? {
                    return Ok(Some(ResolvedKey::named(layer)));
                }
            }
        }
        Ok(None)
    }
}
