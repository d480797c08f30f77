use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClashError;

/// Identifier selecting the key-extraction strategy for one grouping level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    /// Skip this level.
    #[default]
    None,
    Level,
    GridIntersection,
    SelectionA,
    SelectionB,
    ModelA,
    ModelB,
    AssignedTo,
    ApprovedBy,
    Status,
    File,
    Layer,
    First,
    Last,
    LastUnique,
}

impl GroupingMode {
    /// Every mode, in declaration (and mode-picker) order.
    pub const ALL: [GroupingMode; 15] = [
        Self::None,
        Self::Level,
        Self::GridIntersection,
        Self::SelectionA,
        Self::SelectionB,
        Self::ModelA,
        Self::ModelB,
        Self::AssignedTo,
        Self::ApprovedBy,
        Self::Status,
        Self::File,
        Self::Layer,
        Self::First,
        Self::Last,
        Self::LastUnique,
    ];

    /// Label offered to users.
    pub fn description(&self) -> &'static str {
        match self {
            Self::None => "<None>",
            Self::Level => "Level",
            Self::GridIntersection => "Grid Intersection",
            Self::SelectionA => "Selection A",
            Self::SelectionB => "Selection B",
            Self::ModelA => "Model A",
            Self::ModelB => "Model B",
            Self::AssignedTo => "Assigned To",
            Self::ApprovedBy => "Approved By",
            Self::Status => "Status",
            Self::File => "File",
            Self::Layer => "Layer",
            Self::First => "First",
            Self::Last => "Last",
            Self::LastUnique => "Last Unique",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Modes that need an active grid system.
    pub fn requires_grid(&self) -> bool {
        matches!(self, Self::Level | Self::GridIntersection)
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Accepts the description or the variant name, ignoring case, spaces,
/// underscores and punctuation: `"Grid Intersection"`, `"grid_intersection"`
/// and `"GridIntersection"` all parse.
impl FromStr for GroupingMode {
    type Err = ClashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|mode| normalize(mode.description()) == wanted)
            .ok_or_else(|| ClashError::UnknownGroupingMode(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
