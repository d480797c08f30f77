// Single source of truth for all default values.

// --- Grouping ---
pub const DEFAULT_KEEP_EXISTING_GROUPS: bool = false;
pub const DEFAULT_MAX_HIERARCHY_DEPTH: usize = 4_096;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;
pub const DEFAULT_TRANSACTION_LABEL: &str = "Group clashes";
pub const DEFAULT_PROGRESS_TITLE: &str = "Copying Results";

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "clash=info";
pub const DEFAULT_JSON_LOGS: bool = false;
