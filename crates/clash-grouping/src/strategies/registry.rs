use std::collections::HashMap;
use std::sync::Arc;

use clash_core::errors::{ClashError, ClashResult};
use clash_core::models::{ClashSide, GroupingMode};
use clash_core::traits::IGridSystem;

use super::{
    ApprovedByStrategy, AssignedToStrategy, ElementStrategy, FileStrategy,
    GridIntersectionStrategy, KeyStrategy, LastUniqueStrategy, LayerStrategy, LevelStrategy,
    ModelStrategy, SelectionStrategy, StatusStrategy,
};

/// Maps each grouping mode to its key strategy.
///
/// `GroupingMode::None` is never registered: it means "skip this level".
#[derive(Default, Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<GroupingMode, Arc<dyn KeyStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in strategy. Spatial modes are only registered when a
    /// grid system is available.
    pub fn with_builtins(grid: Option<Arc<dyn IGridSystem>>) -> Self {
        let mut registry = Self::new();
        if let Some(grid) = grid {
            registry.register(Arc::new(LevelStrategy::new(Arc::clone(&grid))));
            registry.register(Arc::new(GridIntersectionStrategy::new(grid)));
        }
        registry.register(Arc::new(SelectionStrategy::new(ClashSide::A)));
        registry.register(Arc::new(SelectionStrategy::new(ClashSide::B)));
        registry.register(Arc::new(ModelStrategy::new(ClashSide::A)));
        registry.register(Arc::new(ModelStrategy::new(ClashSide::B)));
        registry.register(Arc::new(AssignedToStrategy));
        registry.register(Arc::new(ApprovedByStrategy));
        registry.register(Arc::new(StatusStrategy));
        registry.register(Arc::new(FileStrategy));
        registry.register(Arc::new(LayerStrategy));
        registry.register(Arc::new(ElementStrategy::first()));
        registry.register(Arc::new(ElementStrategy::last()));
        registry.register(Arc::new(LastUniqueStrategy));
        registry
    }

    /// Add or replace the strategy for its mode. Returns the replaced one.
    pub fn register(&mut self, strategy: Arc<dyn KeyStrategy>) -> Option<Arc<dyn KeyStrategy>> {
        let mode = strategy.mode();
        if mode.is_none() {
            tracing::warn!("ignoring strategy registered for the None mode");
            return None;
        }
        self.strategies.insert(mode, strategy)
    }

    pub fn get(&self, mode: GroupingMode) -> Option<&dyn KeyStrategy> {
        self.strategies.get(&mode).map(|s| s.as_ref())
    }

    pub fn require(&self, mode: GroupingMode) -> ClashResult<&dyn KeyStrategy> {
        self.get(mode).ok_or_else(|| ClashError::StrategyNotRegistered {
            mode: mode.to_string(),
        })
    }

    pub fn contains(&self, mode: GroupingMode) -> bool {
        self.strategies.contains_key(&mode)
    }

    /// Selectable modes in picker order, `None` first.
    pub fn available_modes(&self) -> Vec<GroupingMode> {
        GroupingMode::ALL
            .into_iter()
            .filter(|mode| mode.is_none() || self.contains(*mode))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use clash_core::models::{GridIntersection, Point3};

    use super::*;

    struct NoGrid;

    impl IGridSystem for NoGrid {
        fn closest_intersection(&self, _: &Point3) -> Option<GridIntersection> {
            None
        }
    }

    #[test]
    fn grid_modes_hidden_without_grid() {
        let registry = StrategyRegistry::with_builtins(None);
        let modes = registry.available_modes();
        assert_eq!(modes.first(), Some(&GroupingMode::None));
        assert!(!modes.contains(&GroupingMode::Level));
        assert!(!modes.contains(&GroupingMode::GridIntersection));
        assert_eq!(modes.len(), 13);
    }

    #[test]
    fn grid_modes_listed_with_grid() {
        let registry = StrategyRegistry::with_builtins(Some(Arc::new(NoGrid)));
        assert_eq!(registry.available_modes(), GroupingMode::ALL.to_vec());
        assert_eq!(registry.len(), 14);
    }

    #[test]
    fn missing_strategy_is_an_error() {
        let registry = StrategyRegistry::new();
        let err = registry.require(GroupingMode::Status).err().unwrap();
        assert!(matches!(err, ClashError::StrategyNotRegistered { .. }));
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = StrategyRegistry::with_builtins(None);
        let replaced = registry.register(Arc::new(StatusStrategy));
        assert!(replaced.is_some());
    }
}
