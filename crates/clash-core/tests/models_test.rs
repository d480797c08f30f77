//! Integration tests for the clash data model.

use clash_core::models::{
    ClashGroup, ClashNode, ClashRecord, ClashSide, ClashStatus, ClashTest, ElementId, Point3,
    PropertyValue,
};

fn record(id: &str) -> ClashRecord {
    ClashRecord::new(id, format!("Clash {id}"))
}

fn sample_test() -> ClashTest {
    let mut test = ClashTest::new("Ducts vs Walls");
    test.push(record("c1"));
    let mut group = ClashGroup::new("Manual");
    group.push(record("c2"));
    group.push(record("c3"));
    let mut nested = ClashGroup::new("Nested");
    nested.push(record("c4"));
    group.push(nested);
    test.push(group);
    test
}

#[test]
fn create_copy_refreshes_identity_but_keeps_source() {
    let original = record("c1")
        .with_status(ClashStatus::Approved)
        .with_center(Point3::new(1.0, 2.0, 3.0));
    let copy = original.create_copy();
    assert_ne!(copy.node_id, original.node_id);
    assert_eq!(copy.source_id, original.source_id);
    assert_eq!(copy.status, ClashStatus::Approved);
    assert_eq!(copy.center, original.center);
}

#[test]
fn clone_keeps_identity() {
    let original = record("c1");
    assert_eq!(original.clone().node_id, original.node_id);
}

#[test]
fn element_or_other_falls_back_to_the_other_side() {
    let r = record("c1").with_elements(None, Some(ElementId::new("b")));
    assert_eq!(r.element(ClashSide::A), None);
    assert_eq!(r.element_or_other(ClashSide::A).map(ElementId::as_str), Some("b"));
    assert_eq!(r.element_or_other(ClashSide::B).map(ElementId::as_str), Some("b"));
}

#[test]
fn leaf_count_includes_nested_groups() {
    let test = sample_test();
    assert_eq!(test.leaf_count(), 4);
    assert_eq!(test.leaf_source_ids(), vec!["c1", "c2", "c3", "c4"]);
    assert_eq!(test.groups().count(), 1);
    assert_eq!(test.loose_records().count(), 1);
}

#[test]
fn group_records_skips_nested_groups() {
    let test = sample_test();
    let group = test.groups().next().unwrap();
    assert_eq!(group.records().count(), 2);
    assert_eq!(group.leaves().len(), 3);
}

#[test]
fn deep_copy_refreshes_every_identity() {
    let test = sample_test();
    let copy = test.create_copy();
    assert_ne!(copy.node_id, test.node_id);
    assert_eq!(copy.leaf_source_ids(), test.leaf_source_ids());
    let originals: Vec<_> = test.leaves().iter().map(|r| r.node_id).collect();
    assert!(copy.leaves().iter().all(|r| !originals.contains(&r.node_id)));
}

#[test]
fn copy_without_children_keeps_test_identity() {
    let test = sample_test();
    let shell = test.create_copy_without_children();
    assert!(shell.is_empty());
    assert_eq!(shell.display_name, test.display_name);
    assert_eq!(shell.node_id, test.node_id);
    assert_ne!(shell.fingerprint(), test.fingerprint());
}

#[test]
fn fingerprint_tracks_identity_and_order() {
    let test = sample_test();
    assert_eq!(test.fingerprint(), test.clone().fingerprint());
    assert_ne!(test.fingerprint(), test.create_copy().fingerprint());

    let mut reordered = test.clone();
    reordered.children.reverse();
    assert_ne!(test.fingerprint(), reordered.fingerprint());
}

#[test]
fn node_serializes_with_kind_tag() {
    let node = ClashNode::Record(record("c1"));
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["kind"], "record");
    let back: ClashNode = serde_json::from_value(json).unwrap();
    assert_eq!(back, node);
}

#[test]
fn property_values_display_like_the_host() {
    assert_eq!(PropertyValue::Text("A-Walls".into()).to_display_string(), "A-Walls");
    assert_eq!(PropertyValue::Integer(3).to_display_string(), "3");
    assert_eq!(PropertyValue::Boolean(true).to_display_string(), "Yes");
    assert_eq!(PropertyValue::Empty.to_display_string(), "");
}

#[test]
fn status_displays_its_name() {
    assert_eq!(ClashStatus::New.to_string(), "New");
    assert_eq!(ClashStatus::Resolved.to_string(), "Resolved");
}
