use serde::Deserialize;

use clash_core::models::{ClashRecord, ClashStatus, ClashTest, ElementId, Point3};

use crate::{load_fixture, FixedGrid, InMemoryModelTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    File,
    Composite,
    Element,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    pub id: String,
    pub name: String,
    pub kind: ElementKind,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertySpec {
    pub element: String,
    pub category: String,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClashSpec {
    pub id: String,
    #[serde(default)]
    pub a: Option<String>,
    #[serde(default)]
    pub b: Option<String>,
    #[serde(default)]
    pub status: ClashStatus,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub center: [f64; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridPointSpec {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub level: String,
    pub elevation: f64,
}

/// A model tree, an optional grid and one clash test, loaded from
/// `fixtures/scenarios/<name>.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
    #[serde(default)]
    pub grid: Vec<GridPointSpec>,
    pub clashes: Vec<ClashSpec>,
}

impl Scenario {
    pub fn load(name: &str) -> Self {
        load_fixture(&format!("scenarios/{name}.json"))
    }

    pub fn model_tree(&self) -> InMemoryModelTree {
        let mut tree = InMemoryModelTree::new();
        for e in &self.elements {
            let parent = e.parent.as_deref().unwrap_or_default();
            tree = match (e.kind, e.parent.is_some()) {
                (ElementKind::File, false) => tree.file(&e.id, &e.name),
                (ElementKind::File, true) => tree.nested_file(&e.id, &e.name, parent),
                (ElementKind::Composite, _) => tree.composite(&e.id, &e.name, parent),
                (ElementKind::Element, _) => tree.element(&e.id, &e.name, parent),
            };
        }
        for p in &self.properties {
            tree = tree.property(&p.element, &p.category, &p.name, &p.value);
        }
        tree
    }

    pub fn grid(&self) -> Option<FixedGrid> {
        if self.grid.is_empty() {
            return None;
        }
        Some(self.grid.iter().fold(FixedGrid::new(), |grid, g| {
            grid.with_intersection(&g.name, g.x, g.y, &g.level, g.elevation)
        }))
    }

    pub fn records(&self) -> Vec<ClashRecord> {
        self.clashes
            .iter()
            .map(|c| {
                let mut record = ClashRecord::new(&c.id, format!("Clash {}", c.id))
                    .with_elements(c.a.as_deref().map(ElementId::from), c.b.as_deref().map(ElementId::from))
                    .with_center(Point3::new(c.center[0], c.center[1], c.center[2]))
                    .with_status(c.status);
                if let Some(who) = &c.assigned_to {
                    record = record.with_assigned_to(who);
                }
                if let Some(who) = &c.approved_by {
                    record = record.with_approved_by(who);
                }
                record
            })
            .collect()
    }

    /// The clashes as loose children of one test.
    pub fn test(&self) -> ClashTest {
        crate::flat_test(&self.name, self.records())
    }
}
