use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::GroupingMode;

/// Grouping pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Mode preselected for the first grouping level.
    pub default_group_by: GroupingMode,
    /// Mode preselected for the second grouping level.
    pub default_then_by: GroupingMode,
    /// Preserve pre-existing groups unless a request says otherwise.
    pub keep_existing_groups: bool,
    /// Upper bound on ancestor-walk steps before a hierarchy is declared malformed.
    pub max_hierarchy_depth: usize,
    /// Record count at which key resolution switches to the rayon pool.
    pub parallel_threshold: usize,
    /// Label of the document transaction wrapping each apply.
    pub transaction_label: String,
    /// Title shown by the host progress indicator.
    pub progress_title: String,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            default_group_by: GroupingMode::None,
            default_then_by: GroupingMode::None,
            keep_existing_groups: defaults::DEFAULT_KEEP_EXISTING_GROUPS,
            max_hierarchy_depth: defaults::DEFAULT_MAX_HIERARCHY_DEPTH,
            parallel_threshold: defaults::DEFAULT_PARALLEL_THRESHOLD,
            transaction_label: defaults::DEFAULT_TRANSACTION_LABEL.to_string(),
            progress_title: defaults::DEFAULT_PROGRESS_TITLE.to_string(),
        }
    }
}
