//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `legal_codes`: a loaded [`RecordState`] over [`LEGAL_CODES`]
//! - `situations`: a loaded [`RecordState`] over [`SITUATIONS`] with the situation preset
//! - `temp_workspace`: an empty [`TempWorkspace`] for file-loading tests

use penal_search::loader::RawSource;
use penal_search::{EngineConfig, RecordKind, RecordState};
use rstest::fixture;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Penal codes wrapped under `items`, with mixed alias keys and value shapes.
pub const LEGAL_CODES: &str = r#"{
  "items": [
    {"id": "2.10.6", "title": "Evading", "category": "Felony",
     "description": "Fleeing from a peace officer in a vehicle",
     "keywords": ["flee", "pursuit"], "fine": 1500, "stars": 3},
    {"code": "2.10.7", "name": "Reckless Evading", "type": "Felony",
     "tags": "flee, reckless", "amount": "$2,500", "wanted": 4},
    {"section": "3.1", "offense": "Robbery", "class": "Felony",
     "details": "Taking property by force", "fee": 2500, "heat": 4,
     "jail": 30},
    {"id": "4.2", "title": "Possession of Cocaine", "category": "Misdemeanor",
     "description": "Holding a controlled substance", "fine": "750", "stars": 1},
    {"id": "4.3", "title": "Drug Trafficking", "category": "Felony",
     "description": "Selling cocaine or other narcotics", "fine": 5000, "stars": 5},
    {"id": "5.1", "title": "Jaywalking", "category": "Infraction", "fine": 50},
    {"notes": "no identity"},
    "not a record"
  ]
}"#;

/// Situational playbooks wrapped under `situations`.
pub const SITUATIONS: &str = r#"{
  "situations": [
    {"id": "S1", "title": "Traffic stop gone bad", "tags": ["traffic", "evad"],
     "steps": ["Call backup", "Pursue"], "charges": "2.10.6"},
    {"id": "S2", "title": "Store robbery", "tags": ["robbery"],
     "steps": "Secure the perimeter"},
    {"id": "S3", "title": "Evading-pursuit on foot", "tags": ["foot"]}
  ]
}"#;

pub fn value(raw: &str) -> Value {
    serde_json::from_str(raw).expect("fixture JSON is valid")
}

/// A fresh state of `kind` with `raw` already installed.
pub fn loaded_state(kind: RecordKind, raw: &str) -> RecordState {
    loaded_with(kind.config(), raw)
}

pub fn loaded_with(config: EngineConfig, raw: &str) -> RecordState {
    let state = RecordState::new(config);
    state
        .complete_load(RawSource::from_bytes(raw.as_bytes(), None))
        .expect("fixture dataset loads");
    state
}

#[fixture]
pub fn legal_codes() -> RecordState {
    loaded_state(RecordKind::LegalCode, LEGAL_CODES)
}

#[fixture]
pub fn situations() -> RecordState {
    loaded_state(RecordKind::Situation, SITUATIONS)
}

/// A temporary directory for dataset and config files, removed on drop.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `content` to `name` inside the workspace and returns the full path.
    ///
    /// # Panics
    /// Panics if the write fails.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(name);
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", name, e));
        full_path
    }
}

#[fixture]
pub fn temp_workspace() -> TempWorkspace {
    TempWorkspace::new()
}
