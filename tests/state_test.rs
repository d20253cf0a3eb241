mod common;

use assert2::check;
use common::{LEGAL_CODES, SITUATIONS, TempWorkspace, situations, temp_workspace};
use penal_search::config::{self, TokenizerMode};
use penal_search::tools::load_dataset::{LoadDatasetRequest, handle_load_dataset};
use penal_search::tools::lookup::{LookupRequest, handle_lookup};
use penal_search::tools::status::handle_status;
use penal_search::{EngineConfig, LoadError, RecordKind, RecordState, SearchOptions, SearchOutcome, Status};
use rstest::rstest;

// --- File loading ---

#[rstest]
#[tokio::test]
async fn loads_a_wrapped_file(temp_workspace: TempWorkspace) {
    let path = temp_workspace.create_file("codes.json", LEGAL_CODES);
    let state = RecordState::new(EngineConfig::default());

    let report = state.load_file(&path).await.unwrap();
    check!(report.records == 6);
    check!(report.dropped == 2);
    check!(!report.reused);
    check!(state.status() == Status::Loaded);
    check!(state.origin().as_deref() == Some(path.as_path()));
}

#[rstest]
#[tokio::test]
async fn malformed_file_leaves_error_state(temp_workspace: TempWorkspace) {
    let path = temp_workspace.create_file("broken.json", "{\"items\": [");
    let state = RecordState::new(EngineConfig::default());

    let err = state.load_file(&path).await.unwrap_err();
    check!(matches!(err, LoadError::Parse { .. }));

    let outcome = state.search("robbery", &SearchOptions::default());
    check!(outcome == SearchOutcome::NotReady);
    check!(state.status_of(&outcome) == Status::Error);
    check!(handle_status(&state).contains("Last load failed"));
}

#[rstest]
#[tokio::test]
async fn missing_file_is_a_read_error(temp_workspace: TempWorkspace) {
    let state = RecordState::new(EngineConfig::default());
    let err = state
        .load_file(&temp_workspace.path().join("absent.json"))
        .await
        .unwrap_err();
    check!(matches!(err, LoadError::Read { .. }));
}

#[rstest]
#[tokio::test]
async fn reload_picks_up_edits(temp_workspace: TempWorkspace) {
    let path = temp_workspace.create_file("codes.json", r#"[{"id": "1", "title": "One"}]"#);
    let state = RecordState::new(EngineConfig::default());
    let request = || LoadDatasetRequest {
        path: path.display().to_string(),
    };

    handle_load_dataset(&state, request()).await.unwrap();
    let unchanged = handle_load_dataset(&state, request()).await.unwrap();
    check!(unchanged.contains("Dataset unchanged"));

    temp_workspace.create_file(
        "codes.json",
        r#"[{"id": "1", "title": "One"}, {"id": "2", "title": "Two"}]"#,
    );
    let reloaded = handle_load_dataset(&state, request()).await.unwrap();
    check!(reloaded.contains("Loaded 2 records"));
    check!(state.snapshot().unwrap().len() == 2);
}

// --- Situation preset ---

#[rstest]
fn situation_steps_become_notes(situations: RecordState) {
    let dataset = situations.snapshot().unwrap();
    let first = dataset.find_by_code("S1").unwrap();
    check!(first.notes.as_deref() == Some("Call backup; Pursue"));
}

#[rstest]
fn situation_search_uses_strict_tokens(situations: RecordState) {
    let outcome = situations.search("store-robbery!", &SearchOptions::default());
    let results = outcome.results().unwrap();
    check!(results.records[0].record.id == "S2");
    check!(results.records.len() == 1);
}

#[rstest]
fn status_lists_tags(situations: RecordState) {
    let output = handle_status(&situations);
    check!(output.starts_with("Status: loaded"));
    check!(output.contains("Records: 3 (0 skipped)"));
    check!(output.contains("Tokenizer: Strict"));
    check!(output.contains("  • robbery"));
}

// --- Lookup ---

#[test]
fn lookup_requires_a_dataset() {
    let state = RecordState::new(EngineConfig::default());
    let err = handle_lookup(
        &state,
        &LookupRequest {
            code: "2.10.6".to_string(),
        },
    )
    .unwrap_err();
    check!(err.starts_with("Status: loading"));
}

// --- Configuration layering ---

#[rstest]
fn config_file_overrides_preset(temp_workspace: TempWorkspace) {
    let path = temp_workspace.create_file(
        "engine.toml",
        r#"
        tokenizer = "loose"

        [aliases]
        title = ["scenario"]
        "#,
    );
    let cfg = config::load_over(&path, &RecordKind::Situation.config()).unwrap();
    check!(cfg.tokenizer == TokenizerMode::Loose);
    check!(cfg.limit == 80);

    let state = common::loaded_with(cfg, r#"{"situations": [{"id": "7", "scenario": "Bank job"}]}"#);
    check!(state.snapshot().unwrap().find_by_code("7").unwrap().title == "Bank job");
}

#[rstest]
fn invalid_config_is_rejected(temp_workspace: TempWorkspace) {
    let path = temp_workspace.create_file("engine.toml", "limit = 0\n");
    let err = config::load_over(&path, &EngineConfig::default()).unwrap_err();
    check!(err.to_string().contains("limit"));
}

#[test]
fn situations_fixture_parses() {
    check!(common::value(SITUATIONS)["situations"].as_array().unwrap().len() == 3);
}
