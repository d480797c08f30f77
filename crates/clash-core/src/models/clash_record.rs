use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClashStatus, ElementId, NodeId, Point3};

/// Which participant of a clash is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClashSide {
    A,
    B,
}

impl ClashSide {
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// One detected collision between two model elements.
///
/// `Clone` keeps the node identity (read snapshots, rollback copies);
/// [`ClashRecord::create_copy`] produces a placeable copy with a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClashRecord {
    pub node_id: NodeId,
    /// Stable identity of the clash, shared by every copy.
    pub source_id: String,
    pub display_name: String,
    pub element_a: Option<ElementId>,
    pub element_b: Option<ElementId>,
    pub center: Point3,
    pub status: ClashStatus,
    pub approved_by: Option<String>,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ClashRecord {
    pub fn new(source_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            node_id: NodeId::new(),
            source_id: source_id.into(),
            display_name: display_name.into(),
            element_a: None,
            element_b: None,
            center: Point3::default(),
            status: ClashStatus::New,
            approved_by: None,
            assigned_to: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_elements(mut self, a: Option<ElementId>, b: Option<ElementId>) -> Self {
        self.element_a = a;
        self.element_b = b;
        self
    }

    pub fn with_center(mut self, center: Point3) -> Self {
        self.center = center;
        self
    }

    pub fn with_status(mut self, status: ClashStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_approved_by(mut self, who: impl Into<String>) -> Self {
        self.approved_by = Some(who.into());
        self
    }

    pub fn with_assigned_to(mut self, who: impl Into<String>) -> Self {
        self.assigned_to = Some(who.into());
        self
    }

    /// Copy with a fresh node identity, ready to enter another container.
    pub fn create_copy(&self) -> Self {
        Self {
            node_id: NodeId::new(),
            ..self.clone()
        }
    }

    pub fn element(&self, side: ClashSide) -> Option<&ElementId> {
        match side {
            ClashSide::A => self.element_a.as_ref(),
            ClashSide::B => self.element_b.as_ref(),
        }
    }

    /// The element on `side`, or the other participant when that side is empty.
    pub fn element_or_other(&self, side: ClashSide) -> Option<&ElementId> {
        self.element(side).or_else(|| self.element(side.other()))
    }

    pub(crate) fn hash_into(&self, hasher: &mut blake3::Hasher) {
        hasher.update(b"record");
        hasher.update(self.node_id.as_bytes());
        hasher.update(self.source_id.as_bytes());
        hasher.update(self.display_name.as_bytes());
    }
}
