use std::fmt;

use serde::{Deserialize, Serialize};

/// Review status of a clash record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClashStatus {
    #[default]
    New,
    Active,
    Reviewed,
    Approved,
    Resolved,
}

impl ClashStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Active => "Active",
            Self::Reviewed => "Reviewed",
            Self::Approved => "Approved",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for ClashStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
