use serde::{Deserialize, Serialize};

use super::{ClashRecord, NodeId};

/// Child of a clash test or group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClashNode {
    Record(ClashRecord),
    Group(ClashGroup),
}

impl ClashNode {
    pub fn node_id(&self) -> NodeId {
        match self {
            Self::Record(r) => r.node_id,
            Self::Group(g) => g.node_id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Record(r) => &r.display_name,
            Self::Group(g) => &g.display_name,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    pub fn as_record(&self) -> Option<&ClashRecord> {
        match self {
            Self::Record(r) => Some(r),
            Self::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&ClashGroup> {
        match self {
            Self::Group(g) => Some(g),
            Self::Record(_) => None,
        }
    }

    /// Number of records below (or at) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Record(_) => 1,
            Self::Group(g) => g.leaf_count(),
        }
    }

    /// Deep copy with fresh identities.
    pub fn create_copy(&self) -> Self {
        match self {
            Self::Record(r) => Self::Record(r.create_copy()),
            Self::Group(g) => Self::Group(g.create_copy()),
        }
    }

    pub(crate) fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ClashRecord>) {
        match self {
            Self::Record(r) => out.push(r),
            Self::Group(g) => g.children.iter().for_each(|c| c.collect_leaves(out)),
        }
    }

    pub(crate) fn hash_into(&self, hasher: &mut blake3::Hasher) {
        match self {
            Self::Record(r) => r.hash_into(hasher),
            Self::Group(g) => g.hash_into(hasher),
        }
    }
}

impl From<ClashRecord> for ClashNode {
    fn from(record: ClashRecord) -> Self {
        Self::Record(record)
    }
}

impl From<ClashGroup> for ClashNode {
    fn from(group: ClashGroup) -> Self {
        Self::Group(group)
    }
}

/// Named container of clash records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClashGroup {
    pub node_id: NodeId,
    pub display_name: String,
    pub children: Vec<ClashNode>,
}

impl ClashGroup {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            node_id: NodeId::new(),
            display_name: display_name.into(),
            children: Vec::new(),
        }
    }

    /// Build a group whose children are the given records.
    pub fn with_records(display_name: impl Into<String>, records: Vec<ClashRecord>) -> Self {
        Self {
            node_id: NodeId::new(),
            display_name: display_name.into(),
            children: records.into_iter().map(ClashNode::Record).collect(),
        }
    }

    pub fn push(&mut self, child: impl Into<ClashNode>) {
        self.children.push(child.into());
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Direct record children, skipping nested groups.
    pub fn records(&self) -> impl Iterator<Item = &ClashRecord> {
        self.children.iter().filter_map(ClashNode::as_record)
    }

    pub fn leaf_count(&self) -> usize {
        self.children.iter().map(ClashNode::leaf_count).sum()
    }

    /// Every record below this group, depth-first.
    pub fn leaves(&self) -> Vec<&ClashRecord> {
        let mut out = Vec::with_capacity(self.children.len());
        self.children.iter().for_each(|c| c.collect_leaves(&mut out));
        out
    }

    /// Deep copy with fresh identities for the group and every descendant.
    pub fn create_copy(&self) -> Self {
        Self {
            node_id: NodeId::new(),
            display_name: self.display_name.clone(),
            children: self.children.iter().map(ClashNode::create_copy).collect(),
        }
    }

    pub(crate) fn hash_into(&self, hasher: &mut blake3::Hasher) {
        hasher.update(b"group");
        hasher.update(self.node_id.as_bytes());
        hasher.update(self.display_name.as_bytes());
        hasher.update(&(self.children.len() as u64).to_le_bytes());
        for child in &self.children {
            child.hash_into(hasher);
        }
    }
}
