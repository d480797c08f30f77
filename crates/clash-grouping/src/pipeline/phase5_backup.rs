//! Phase 5 (Backup): Deep copies of the groups being preserved.

use clash_core::models::{ClashGroup, ClashTest};

/// Copy every top-level group of `test` with fresh identities, keeping
/// names, order and members.
pub fn backup_existing_groups(test: &ClashTest) -> Vec<ClashGroup> {
    test.groups().map(ClashGroup::create_copy).collect()
}
