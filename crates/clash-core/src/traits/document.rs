use crate::errors::ClashResult;
use crate::models::{ClashNode, ClashTest, NodeId};

/// Mutable access to the clash tests of a host document.
///
/// Structural mutations take ownership of the node they insert: a node
/// lives in exactly one container at a time.
pub trait IClashDocument: Send + Sync {
    /// Ids of all clash tests, in document order.
    fn test_ids(&self) -> Vec<NodeId>;

    /// Current index of the test with `id`.
    fn find_test(&self, id: &NodeId) -> Option<usize>;

    /// Identity-preserving snapshot of the test at `index`.
    fn read_test(&self, index: usize) -> ClashResult<ClashTest>;

    fn begin_transaction(&self, label: &str) -> ClashResult<()>;

    fn commit_transaction(&self) -> ClashResult<()>;

    /// Replace the test at `index`; the previous test is discarded.
    fn replace_test(&self, index: usize, test: ClashTest) -> ClashResult<()>;

    /// Append a child to the test at `index`.
    fn append_child(&self, index: usize, child: ClashNode) -> ClashResult<()>;
}
