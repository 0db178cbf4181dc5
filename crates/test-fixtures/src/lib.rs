//! Test fixtures for the Verity workspace.
//!
//! - a small LIAR-style labeled corpus
//! - [`http::StallingServer`], a listener that never replies, for HTTP client
//!   timeout tests

pub mod http;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use verity_core::models::Record;

/// Root directory of the fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// The sample labeled corpus.
pub fn liar_sample() -> Vec<Record> {
    load_fixture("corpus/liar_sample.json")
}

/// A record with only the fields that drive chunking and interpretation.
pub fn record(statement: &str, label: i64) -> Record {
    Record::new(statement, "", "", label)
}
