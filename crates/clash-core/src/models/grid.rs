use serde::{Deserialize, Serialize};

use super::Point3;

/// A level of the active grid system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLevel {
    pub id: String,
    pub name: String,
    pub elevation: f64,
}

/// Crossing of two grid lines on a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridIntersection {
    pub id: String,
    pub name: String,
    pub position: Point3,
    pub level: GridLevel,
}
