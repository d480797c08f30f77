//! In-memory host and scenario fixtures for clash grouping tests.
//!
//! The host types implement the `clash-core` boundary traits with plain
//! collections and failure injection; scenarios are JSON files under
//! `fixtures/` describing a model tree and a clash test.

mod document;
mod grid;
mod model_tree;
mod progress;
mod records;
mod scenario;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use document::InMemoryDocument;
pub use grid::FixedGrid;
pub use model_tree::InMemoryModelTree;
pub use progress::RecordingProgress;
pub use records::{clash, clash_at, flat_test, record};
pub use scenario::Scenario;

/// Root directory of the fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "fixtures directory not found");
    }

    #[test]
    fn all_scenario_files_exist() {
        for f in ["scenarios/mep_coordination.json", "scenarios/layered_model.json"] {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }
}
