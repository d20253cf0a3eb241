//! Dataset status handler: lifecycle, counts and known categories.

use crate::state::{LoadState, RecordState};
use std::fmt::Write as _;

/// Categories listed before the remainder is summarized.
const MAX_LISTED_CATEGORIES: usize = 30;

pub fn handle_status(state: &RecordState) -> String {
    let mut output = format!("Status: {}\n", state.status());

    match state.load_state() {
        LoadState::Unloaded => output.push_str("No dataset loaded. Use load_dataset with a JSON file path.\n"),
        LoadState::Loading => output.push_str("Dataset is loading.\n"),
        LoadState::Failed(reason) => {
            let _ = writeln!(output, "Last load failed: {}", reason);
        }
        LoadState::Loaded {
            dataset,
            fingerprint,
            origin,
        } => {
            let _ = writeln!(
                output,
                "Records: {} ({} skipped)",
                dataset.len(),
                dataset.dropped()
            );
            if let Some(origin) = origin {
                let _ = writeln!(output, "Source: {}", origin.display());
            }
            let _ = writeln!(output, "Fingerprint: {}", fingerprint);
            let _ = writeln!(output, "Tokenizer: {:?}", state.config().tokenizer);

            let categories = dataset.categories();
            if !categories.is_empty() {
                let _ = writeln!(output, "\nCategories ({}):", categories.len());
                for category in categories.iter().take(MAX_LISTED_CATEGORIES) {
                    let _ = writeln!(output, "  • {}", category);
                }
                if categories.len() > MAX_LISTED_CATEGORIES {
                    let _ = writeln!(
                        output,
                        "  ... and {} more",
                        categories.len() - MAX_LISTED_CATEGORIES
                    );
                }
            }
        }
    }

    output
}
