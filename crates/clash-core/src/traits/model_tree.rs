use crate::errors::ClashResult;
use crate::models::{ElementId, PropertyCategory};

/// Read-only navigation of the host model tree.
///
/// Every call may fail (host exceptions, stale handles); callers classifying
/// records map such failures to a fallback instead of aborting.
pub trait IModelTree: Send + Sync {
    /// Parent of `element`, or `None` at the root.
    fn parent(&self, element: &ElementId) -> ClashResult<Option<ElementId>>;

    /// Whether `element` is a composite (multi-part) node.
    fn is_composite(&self, element: &ElementId) -> ClashResult<bool>;

    /// Whether `element` owns a source-file reference.
    fn has_model(&self, element: &ElementId) -> ClashResult<bool>;

    fn display_name(&self, element: &ElementId) -> ClashResult<String>;

    fn property_categories(&self, element: &ElementId) -> ClashResult<Vec<PropertyCategory>>;
}
