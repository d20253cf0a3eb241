//! Exact code lookup handler.

use crate::format::render_record;
use crate::state::RecordState;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupRequest {
    /// Record code, with or without a "PC" prefix (e.g. "PC 2.10.6")
    pub code: String,
}

/// Show the full record whose normalized code matches.
pub fn handle_lookup(state: &RecordState, request: &LookupRequest) -> Result<String, String> {
    let dataset = state.snapshot().ok_or_else(|| {
        format!(
            "Status: {}\nNo dataset is loaded yet. Use load_dataset first.",
            state.status()
        )
    })?;

    dataset
        .find_by_code(&request.code)
        .map(render_record)
        .ok_or_else(|| format!("No record with code '{}'.", request.code))
}
