use clash_core::models::{GridIntersection, GridLevel, Point3};
use clash_core::traits::IGridSystem;

/// Grid with a fixed set of intersections; queries pick the nearest one
/// within `reach`.
#[derive(Debug, Clone, Default)]
pub struct FixedGrid {
    intersections: Vec<GridIntersection>,
    reach: Option<f64>,
}

impl FixedGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intersection `name` at (`x`, `y`) on a level at `elevation`.
    pub fn with_intersection(
        mut self,
        name: &str,
        x: f64,
        y: f64,
        level: &str,
        elevation: f64,
    ) -> Self {
        self.intersections.push(GridIntersection {
            id: format!("{level}/{name}"),
            name: name.to_string(),
            position: Point3::new(x, y, elevation),
            level: GridLevel {
                id: level.to_string(),
                name: level.to_string(),
                elevation,
            },
        });
        self
    }

    /// Points farther than `reach` from every intersection are off-grid.
    pub fn with_reach(mut self, reach: f64) -> Self {
        self.reach = Some(reach);
        self
    }
}

impl IGridSystem for FixedGrid {
    fn closest_intersection(&self, point: &Point3) -> Option<GridIntersection> {
        self.intersections
            .iter()
            .map(|i| (i.position.distance_squared(point), i))
            .filter(|(d, _)| self.reach.map_or(true, |r| *d <= r * r))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, i)| i.clone())
    }
}
