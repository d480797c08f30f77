use crate::models::{GridIntersection, Point3};

/// Spatial queries against the active grid system.
pub trait IGridSystem: Send + Sync {
    /// Nearest grid intersection to `point`, if any lies within the grid.
    fn closest_intersection(&self, point: &Point3) -> Option<GridIntersection>;
}
