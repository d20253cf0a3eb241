//! Handler that loads (or reloads) the dataset from a JSON file.

use crate::state::RecordState;
use rmcp::schemars;
use serde::Deserialize;
use std::path::Path;

/// Parameters for load_dataset tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoadDatasetRequest {
    /// Path to a JSON file holding a record array or a wrapper object ({"items": [...]})
    pub path: String,
}

/// Load the file and report what was indexed.
pub async fn handle_load_dataset(
    state: &RecordState,
    request: LoadDatasetRequest,
) -> Result<String, String> {
    let path = Path::new(&request.path);
    let report = state
        .load_file(path)
        .await
        .map_err(|e| format!("Status: {}\n{}", state.status(), e))?;

    if report.reused {
        return Ok(format!(
            "Status: {}\nDataset unchanged ({} records, fingerprint {}).",
            state.status(),
            report.records,
            report.fingerprint
        ));
    }

    let mut response = format!(
        "Status: {}\nLoaded {} records from {}",
        state.status(),
        report.records,
        request.path
    );
    if report.dropped > 0 {
        response.push_str(&format!(
            " ({} entries skipped: no id, title or description)",
            report.dropped
        ));
    }
    response.push('.');
    Ok(response)
}
