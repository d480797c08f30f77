use clash_core::models::{ClashRecord, ClashTest, ElementId, Point3};

/// A record with no elements.
pub fn record(source_id: &str) -> ClashRecord {
    ClashRecord::new(source_id, format!("Clash {source_id}"))
}

/// A record between two elements; an empty id leaves that side unset.
pub fn clash(source_id: &str, a: &str, b: &str) -> ClashRecord {
    let side = |id: &str| (!id.is_empty()).then(|| ElementId::from(id));
    record(source_id).with_elements(side(a), side(b))
}

pub fn clash_at(source_id: &str, a: &str, b: &str, center: Point3) -> ClashRecord {
    clash(source_id, a, b).with_center(center)
}

/// A test holding `records` as loose children.
pub fn flat_test(name: &str, records: impl IntoIterator<Item = ClashRecord>) -> ClashTest {
    let mut test = ClashTest::new(name);
    for record in records {
        test.push(record);
    }
    test
}
