//! Property tests for node identity: copies are fresh, clones are not.

use std::collections::HashSet;

use proptest::prelude::*;

use clash_core::models::{ClashGroup, ClashNode, ClashRecord, ClashTest, NodeId};

/// Children described as group sizes; 0 means a loose record.
fn build(shape: &[usize]) -> ClashTest {
    let mut test = ClashTest::new("Shape");
    let mut next = 0usize;
    let mut record = || {
        next += 1;
        ClashRecord::new(format!("c{next}"), format!("Clash {next}"))
    };
    for (i, &size) in shape.iter().enumerate() {
        if size == 0 {
            test.push(record());
        } else {
            let mut group = ClashGroup::new(format!("G{i}"));
            for _ in 0..size {
                group.push(record());
            }
            if size > 2 {
                let mut nested = ClashGroup::new(format!("G{i}_nested"));
                nested.push(record());
                group.push(nested);
            }
            test.push(group);
        }
    }
    test
}

fn node_ids(test: &ClashTest) -> HashSet<NodeId> {
    fn walk(node: &ClashNode, out: &mut HashSet<NodeId>) {
        out.insert(node.node_id());
        if let ClashNode::Group(group) = node {
            group.children.iter().for_each(|c| walk(c, out));
        }
    }
    let mut out = HashSet::new();
    test.children.iter().for_each(|c| walk(c, &mut out));
    out
}

proptest! {
    #[test]
    fn copies_keep_leaves_and_renew_identity(shape in prop::collection::vec(0usize..5, 0..12)) {
        let test = build(&shape);
        let copy = test.create_copy();

        prop_assert_eq!(copy.leaf_source_ids(), test.leaf_source_ids());
        prop_assert_eq!(copy.leaf_count(), test.leaf_count());
        prop_assert!(node_ids(&copy).is_disjoint(&node_ids(&test)));
    }

    #[test]
    fn clones_share_fingerprints(shape in prop::collection::vec(0usize..5, 1..12)) {
        let test = build(&shape);
        prop_assert_eq!(test.clone().fingerprint(), test.fingerprint());
        prop_assert_ne!(test.create_copy().fingerprint(), test.fingerprint());
    }
}
