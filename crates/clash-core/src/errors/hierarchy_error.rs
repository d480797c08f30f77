/// Malformed model-tree hierarchy detected during an ancestor walk.
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("malformed hierarchy: walk from {element} exceeded depth limit {limit}")]
    DepthExceeded { element: String, limit: usize },

    #[error("malformed hierarchy: cycle detected at {element}")]
    CycleDetected { element: String },
}
