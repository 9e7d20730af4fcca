//! Test fixtures for the ATEC recommender: an in-memory answer source,
//! a fault-injecting wrapper, and loaders for the golden JSON scenarios.
//!
//! Panics instead of returning errors; only tests depend on this crate.

pub mod scenario;
pub mod source;

pub use scenario::{Expected, Scenario};
pub use source::{question, FailPoint, FailingAnswerSource, InMemoryAnswerSource};

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the fixture files, shipped inside this crate.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
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

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by file name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// Load every scenario under `scenarios/`.
pub fn load_scenarios() -> Vec<Scenario> {
    list_fixtures("scenarios")
        .iter()
        .map(|path| {
            let relative = path
                .strip_prefix(fixtures_root())
                .unwrap_or_else(|_| panic!("fixture outside root: {}", path.display()));
            load_fixture(&relative.to_string_lossy())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenarios_directory_is_populated() {
        assert!(fixture_exists("scenarios"));
        assert!(!list_fixtures("scenarios").is_empty());
    }

    #[test]
    fn every_scenario_parses_and_has_answers() {
        for scenario in load_scenarios() {
            assert!(!scenario.name.is_empty());
            assert!(!scenario.answers.is_empty(), "{} has no answers", scenario.name);
        }
    }

    #[test]
    fn missing_subdirectory_lists_nothing() {
        assert!(list_fixtures("does-not-exist").is_empty());
    }
}
