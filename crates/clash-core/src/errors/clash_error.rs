use super::{ApplyError, ConfigError, HierarchyError, LookupError};

/// Top-level error for every clash grouping operation.
#[derive(Debug, thiserror::Error)]
pub enum ClashError {
    #[error("hierarchy error: {0}")]
    HierarchyError(#[from] HierarchyError),

    #[error("lookup error: {0}")]
    LookupError(#[from] LookupError),

    #[error("apply error: {0}")]
    ApplyError(#[from] ApplyError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("a grouping operation is already in progress")]
    OperationInProgress,

    #[error("clash test not found: {id}")]
    TestNotFound { id: String },

    #[error("no strategy registered for grouping mode {mode}")]
    StrategyNotRegistered { mode: String },

    #[error("unknown grouping mode: {0}")]
    UnknownGroupingMode(String),

    #[error("worker task failed: {0}")]
    WorkerFailed(String),
}

/// Convenience alias used across the workspace.
pub type ClashResult<T> = Result<T, ClashError>;
