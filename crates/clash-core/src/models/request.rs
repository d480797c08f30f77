use serde::{Deserialize, Serialize};

use super::GroupingMode;

/// What a caller asked for: a first mode, an optional second mode, and
/// whether pre-existing groups survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupingRequest {
    pub group_by: GroupingMode,
    pub then_by: GroupingMode,
    pub keep_existing_groups: bool,
}

impl GroupingRequest {
    pub fn new(group_by: GroupingMode, then_by: GroupingMode, keep_existing_groups: bool) -> Self {
        Self {
            group_by,
            then_by,
            keep_existing_groups,
        }
    }

    /// Single-level request.
    pub fn by(mode: GroupingMode) -> Self {
        Self::new(mode, GroupingMode::None, false)
    }

    pub fn then(mut self, mode: GroupingMode) -> Self {
        self.then_by = mode;
        self
    }

    pub fn keep_existing(mut self, keep: bool) -> Self {
        self.keep_existing_groups = keep;
        self
    }

    /// Promote a lone second mode to the first level.
    ///
    /// Returns `None` when neither level selects a mode.
    pub fn normalized(self) -> Option<Self> {
        match (self.group_by.is_none(), self.then_by.is_none()) {
            (true, true) => None,
            (true, false) => Some(Self {
                group_by: self.then_by,
                then_by: GroupingMode::None,
                ..self
            }),
            _ => Some(self),
        }
    }
}
