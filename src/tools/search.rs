//! Weighted record search handler.

use crate::format::{render_results, render_stats};
use crate::search::{SearchOptions, SearchOutcome, SearchResults, SortMode, Status};
use crate::state::RecordState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Free text or a code such as "PC 2.10.6"
    pub query: String,
    /// Result order (default: relevance)
    #[serde(default)]
    pub sort: Option<SortMode>,
    /// Maximum number of results to return (default: configured limit)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Only return records whose category or a keyword equals this tag
    #[serde(default)]
    pub category: Option<String>,
    /// List every record when the query is empty instead of prompting
    #[serde(default)]
    pub show_all_on_empty: bool,
}

impl SearchRequest {
    fn options(&self) -> SearchOptions {
        SearchOptions {
            mode: self.sort.unwrap_or_default(),
            limit: self.limit,
            category: self.category.clone(),
        }
    }
}

/// Execute a search and render the outcome as text.
///
/// Every outcome is `Ok`: "not loaded", "nothing typed" and "no matches" are
/// statuses the caller displays, not failures.
pub fn handle_search(state: &RecordState, request: &SearchRequest) -> String {
    let options = request.options();
    let outcome = state.search(&request.query, &options);
    let status = state.status_of(&outcome);

    match outcome {
        SearchOutcome::NotReady if status == Status::Error => format!(
            "Status: {status}\nThe dataset failed to load. Use load_dataset to retry."
        ),
        SearchOutcome::NotReady => format!(
            "Status: {status}\nNo dataset is loaded yet. Use load_dataset with a JSON file path."
        ),
        SearchOutcome::EmptyQuery if request.show_all_on_empty => state
            .browse(&options)
            .map(|all| render_listing(Status::EmptyQuery, "All records", &all, false))
            .unwrap_or_default(),
        SearchOutcome::EmptyQuery => format!(
            "Status: {status}\nEnter a code (e.g. 'PC 2.10.6') or keywords (e.g. 'evading', 'robbery')."
        ),
        SearchOutcome::Matches(results) if results.is_empty() => {
            let mut msg = format!(
                "Status: {status}\nNo results found for '{}'.\n\nSearch tips:\n",
                request.query
            );
            msg.push_str("• Try a shorter or more general term\n");
            msg.push_str("• Search by code: '2.10.6', 'PC 2.10.6' and 'pc-2.10.6' are equivalent\n");
            if options.category.is_some() {
                msg.push_str("• Remove the category filter\n");
            }
            msg
        }
        SearchOutcome::Matches(results) => render_listing(
            status,
            &format!("Results for '{}' (sorted by {})", request.query, options.mode),
            &results,
            options.mode == SortMode::Relevance,
        ),
    }
}

fn render_listing(status: Status, heading: &str, results: &SearchResults, show_scores: bool) -> String {
    let mut out = format!("Status: {status}\n{heading}:\n\n");
    out.push_str(&render_results(&results.records, show_scores));
    let _ = write!(out, "\n{}", render_stats(&results.stats));
    out
}
