/// Failures reported by the host while resolving element data.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("element not found: {id}")]
    ElementNotFound { id: String },

    #[error("property access failed on {element}: {reason}")]
    PropertyAccess { element: String, reason: String },

    #[error("host lookup failed: {reason}")]
    Host { reason: String },
}
