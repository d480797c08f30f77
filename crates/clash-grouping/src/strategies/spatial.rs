use std::sync::Arc;

use clash_core::constants::{NO_GRID_INTERSECTION, NO_LEVEL, UNNAMED_GRID_INTERSECTION, UNNAMED_LEVEL};
use clash_core::errors::ClashResult;
use clash_core::models::{ClashRecord, GroupingMode};
use clash_core::traits::IGridSystem;

use super::{non_empty, GroupKey, GroupOrdering, KeyStrategy, ResolvedKey, SpatialOrder};
use crate::ancestors::AncestorResolver;

/// Groups by the grid level nearest to the clash center.
pub struct LevelStrategy {
    grid: Arc<dyn IGridSystem>,
}

impl LevelStrategy {
    pub fn new(grid: Arc<dyn IGridSystem>) -> Self {
        Self { grid }
    }
}

impl KeyStrategy for LevelStrategy {
    fn mode(&self) -> GroupingMode {
        GroupingMode::Level
    }

    fn fallback_name(&self) -> &'static str {
        NO_LEVEL
    }

    fn ordering(&self) -> GroupOrdering {
        GroupOrdering::Spatial
    }

    fn classify(&self, record: &ClashRecord, _: &AncestorResolver<'_>) -> ClashResult<Option<ResolvedKey>> {
        Ok(self.grid.closest_intersection(&record.center).map(|hit| {
            let level = hit.level;
            ResolvedKey {
                name: non_empty(level.name, UNNAMED_LEVEL),
                order: Some(SpatialOrder {
                    elevation: level.elevation,
                    x: 0.0,
                }),
                key: GroupKey::GridLevel(level.id),
            }
        }))
    }
}

/// Groups by the nearest grid intersection, ordered by elevation then X.
pub struct GridIntersectionStrategy {
    grid: Arc<dyn IGridSystem>,
}

impl GridIntersectionStrategy {
    pub fn new(grid: Arc<dyn IGridSystem>) -> Self {
        Self { grid }
    }
}

impl KeyStrategy for GridIntersectionStrategy {
    fn mode(&self) -> GroupingMode {
        GroupingMode::GridIntersection
    }

    fn fallback_name(&self) -> &'static str {
        NO_GRID_INTERSECTION
    }

    fn ordering(&self) -> GroupOrdering {
        GroupOrdering::Spatial
    }

    fn classify(&self, record: &ClashRecord, _: &AncestorResolver<'_>) -> ClashResult<Option<ResolvedKey>> {
        Ok(self.grid.closest_intersection(&record.center).map(|hit| ResolvedKey {
            name: non_empty(hit.name, UNNAMED_GRID_INTERSECTION),
            order: Some(SpatialOrder {
                elevation: hit.level.elevation,
                x: hit.position.x,
            }),
            key: GroupKey::GridIntersection(hit.id),
        }))
    }
}
