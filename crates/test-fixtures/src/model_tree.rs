use std::collections::{HashMap, HashSet};

use clash_core::errors::{ClashResult, LookupError};
use clash_core::models::{ElementId, Property, PropertyCategory, PropertyValue};
use clash_core::traits::IModelTree;

#[derive(Debug, Clone, Default)]
struct Node {
    parent: Option<ElementId>,
    name: String,
    composite: bool,
    has_model: bool,
    categories: Vec<PropertyCategory>,
}

/// Model tree held in a map, built fluently.
///
/// Unknown elements fail with `ElementNotFound`; elements marked with
/// [`failing`](Self::failing) fail every lookup, like a stale host handle.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModelTree {
    nodes: HashMap<ElementId, Node>,
    failing: HashSet<ElementId>,
}

impl InMemoryModelTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A root node owning a source file.
    pub fn file(self, id: &str, name: &str) -> Self {
        self.insert(id, name, None, false, true)
    }

    /// A composite (multi-part) node under `parent`.
    pub fn composite(self, id: &str, name: &str, parent: &str) -> Self {
        self.insert(id, name, Some(parent), true, false)
    }

    /// A plain node under `parent`.
    pub fn element(self, id: &str, name: &str, parent: &str) -> Self {
        self.insert(id, name, Some(parent), false, false)
    }

    /// A file reference nested under `parent` (an appended model).
    pub fn nested_file(self, id: &str, name: &str, parent: &str) -> Self {
        self.insert(id, name, Some(parent), false, true)
    }

    pub fn property(mut self, id: &str, category: &str, name: &str, value: &str) -> Self {
        let node = self.nodes.entry(ElementId::from(id)).or_default();
        let value = if value.is_empty() {
            PropertyValue::Empty
        } else {
            PropertyValue::Text(value.to_string())
        };
        let property = Property {
            name: name.to_string(),
            value,
        };
        match node.categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => existing.properties.push(property),
            None => node
                .categories
                .push(PropertyCategory::new(category, vec![property])),
        }
        self
    }

    /// Re-point `id` at `parent`; used to build malformed (cyclic) trees.
    pub fn reparent(mut self, id: &str, parent: &str) -> Self {
        self.nodes.entry(ElementId::from(id)).or_default().parent = Some(ElementId::from(parent));
        self
    }

    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(ElementId::from(id));
        self
    }

    /// A straight parent chain `prefix0 <- prefix1 <- ... <- prefix{len-1}`.
    pub fn chain(mut self, prefix: &str, len: usize) -> Self {
        for i in 0..len {
            let parent = (i > 0).then(|| format!("{prefix}{}", i - 1));
            self = self.insert(&format!("{prefix}{i}"), &format!("{prefix}{i}"), parent.as_deref(), false, false);
        }
        self
    }

    fn insert(
        mut self,
        id: &str,
        name: &str,
        parent: Option<&str>,
        composite: bool,
        has_model: bool,
    ) -> Self {
        let node = self.nodes.entry(ElementId::from(id)).or_default();
        node.parent = parent.map(ElementId::from);
        node.name = name.to_string();
        node.composite = composite;
        node.has_model = has_model;
        self
    }

    fn node(&self, element: &ElementId) -> ClashResult<&Node> {
        if self.failing.contains(element) {
            return Err(LookupError::Host {
                reason: format!("stale handle {element}"),
            }
            .into());
        }
        self.nodes.get(element).ok_or_else(|| {
            LookupError::ElementNotFound {
                id: element.to_string(),
            }
            .into()
        })
    }
}

impl IModelTree for InMemoryModelTree {
    fn parent(&self, element: &ElementId) -> ClashResult<Option<ElementId>> {
        Ok(self.node(element)?.parent.clone())
    }

    fn is_composite(&self, element: &ElementId) -> ClashResult<bool> {
        Ok(self.node(element)?.composite)
    }

    fn has_model(&self, element: &ElementId) -> ClashResult<bool> {
        Ok(self.node(element)?.has_model)
    }

    fn display_name(&self, element: &ElementId) -> ClashResult<String> {
        Ok(self.node(element)?.name.clone())
    }

    fn property_categories(&self, element: &ElementId) -> ClashResult<Vec<PropertyCategory>> {
        Ok(self.node(element)?.categories.clone())
    }
}
