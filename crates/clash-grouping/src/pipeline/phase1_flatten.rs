//! Phase 1 (Flatten): Collect the leaf records to classify.

use clash_core::models::{ClashNode, ClashRecord, ClashTest};

/// Leaf records of `test` in document order.
///
/// Loose records are always taken. Members of pre-existing groups are only
/// absorbed when those groups are not being kept; nested groups are walked
/// so no leaf is dropped.
pub fn collect_leaf_records(test: &ClashTest, keep_existing_groups: bool) -> Vec<&ClashRecord> {
    let mut leaves = Vec::with_capacity(test.children.len());
    for child in &test.children {
        match child {
            ClashNode::Record(record) => leaves.push(record),
            ClashNode::Group(group) if !keep_existing_groups => leaves.extend(group.leaves()),
            ClashNode::Group(_) => {}
        }
    }
    leaves
}

#[cfg(test)]
mod tests {
    use clash_core::models::ClashGroup;

    use super::*;

    fn sample() -> ClashTest {
        let mut inner = ClashGroup::new("inner");
        inner.push(ClashRecord::new("c3", "Clash3"));
        let mut outer = ClashGroup::with_records("outer", vec![ClashRecord::new("c2", "Clash2")]);
        outer.push(inner);

        let mut test = ClashTest::new("Test");
        test.push(ClashRecord::new("c1", "Clash1"));
        test.push(outer);
        test.push(ClashRecord::new("c4", "Clash4"));
        test
    }

    fn ids(records: &[&ClashRecord]) -> Vec<String> {
        records.iter().map(|r| r.source_id.clone()).collect()
    }

    #[test]
    fn absorbs_nested_groups() {
        let test = sample();
        assert_eq!(ids(&collect_leaf_records(&test, false)), ["c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn keeps_groups_out_when_preserving() {
        let test = sample();
        assert_eq!(ids(&collect_leaf_records(&test, true)), ["c1", "c4"]);
    }
}
