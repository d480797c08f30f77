//! Read-only walks from an element toward the model root.

use std::collections::HashSet;
use std::ops::ControlFlow;

use clash_core::errors::{ClashResult, HierarchyError};
use clash_core::models::ElementId;
use clash_core::traits::IModelTree;

/// Resolves "significant" and "file" ancestors through the host tree.
///
/// Walks are bounded by `max_depth` and a visited set, so a malformed
/// (cyclic or absurdly deep) parent chain fails instead of spinning.
#[derive(Clone, Copy)]
pub struct AncestorResolver<'a> {
    tree: &'a dyn IModelTree,
    max_depth: usize,
}

impl<'a> AncestorResolver<'a> {
    pub fn new(tree: &'a dyn IModelTree, max_depth: usize) -> Self {
        Self { tree, max_depth }
    }

    pub fn tree(&self) -> &'a dyn IModelTree {
        self.tree
    }

    /// The outermost composite ancestor of `element`, or `element` itself.
    pub fn significant_ancestor_or_self(&self, element: &ElementId) -> ClashResult<ElementId> {
        let mut last_composite = None;
        self.walk(element, |ancestor| {
            if self.tree.is_composite(ancestor)? {
                last_composite = Some(ancestor.clone());
            }
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(last_composite.unwrap_or_else(|| element.clone()))
    }

    /// The nearest ancestor owning a source file, or `element` itself.
    pub fn file_ancestor_or_self(&self, element: &ElementId) -> ClashResult<ElementId> {
        let mut file_owner = None;
        self.walk(element, |ancestor| {
            if self.tree.has_model(ancestor)? {
                file_owner = Some(ancestor.clone());
                return Ok(ControlFlow::Break(()));
            }
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(file_owner.unwrap_or_else(|| element.clone()))
    }

    /// Visit every proper ancestor of `element`, nearest first.
    fn walk<F>(&self, element: &ElementId, mut visit: F) -> ClashResult<()>
    where
        F: FnMut(&ElementId) -> ClashResult<ControlFlow<()>>,
    {
        let mut seen = HashSet::new();
        seen.insert(element.clone());
        let mut current = element.clone();
        let mut depth = 0usize;

        while let Some(parent) = self.tree.parent(&current)? {
            depth += 1;
            if depth > self.max_depth {
                return Err(HierarchyError::DepthExceeded {
                    element: element.to_string(),
                    limit: self.max_depth,
                }
                .into());
            }
            if !seen.insert(parent.clone()) {
                return Err(HierarchyError::CycleDetected {
                    element: parent.to_string(),
                }
                .into());
            }
            if visit(&parent)?.is_break() {
                break;
            }
            current = parent;
        }
        Ok(())
    }
}
