//! Plain-text rendering of search results for tool and CLI output.

use crate::record::{CanonicalRecord, MAX_STARS};
use crate::search::{RankedRecord, SearchStats};
use std::fmt::Write as _;

/// Render an amount without trailing zeros: `1500` or `12.50`.
pub fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// One-line headline: `2.10.6 - Evading`, or whichever half exists.
pub fn headline(record: &CanonicalRecord) -> String {
    match (record.id.is_empty(), record.title.is_empty()) {
        (false, false) => format!("{} - {}", record.id, record.title),
        (false, true) => record.id.clone(),
        (true, false) => record.title.clone(),
        (true, true) => "(untitled)".to_string(),
    }
}

/// Bracketed facts that are known for the record; unknown values are omitted.
fn facts(record: &CanonicalRecord) -> Vec<String> {
    let mut facts = Vec::new();
    if let Some(category) = &record.category {
        facts.push(category.clone());
    }
    if let Some(fine) = record.fine {
        facts.push(format!("fine ${}", amount(fine)));
    }
    if let Some(jail) = record.jail_minutes {
        facts.push(format!("jail {} min", amount(jail)));
    }
    if record.stars.is_some() {
        facts.push(format!("stars {}/{}", record.star_rating(), MAX_STARS));
    }
    facts
}

/// Headline plus bracketed facts, on one line.
pub fn summary_line(record: &CanonicalRecord) -> String {
    let mut line = headline(record);
    let facts = facts(record);
    if !facts.is_empty() {
        let _ = write!(line, "  [{}]", facts.join(" | "));
    }
    line
}

/// Indented description, notes and keywords, each on its own line.
fn detail_lines(record: &CanonicalRecord) -> String {
    let mut out = String::new();
    if let Some(description) = &record.description {
        let _ = write!(out, "\n  {}", description);
    }
    if let Some(notes) = &record.notes {
        let _ = write!(out, "\n  Notes: {}", notes);
    }
    if !record.keywords.is_empty() {
        let _ = write!(out, "\n  Keywords: {}", record.keywords.join(", "));
    }
    out
}

/// Full multi-line view of one record.
pub fn render_record(record: &CanonicalRecord) -> String {
    summary_line(record) + &detail_lines(record)
}

/// Bulleted list of ranked records, optionally with their scores.
pub fn render_results(records: &[RankedRecord], show_scores: bool) -> String {
    let mut out = String::new();
    for ranked in records {
        let _ = write!(out, "• {}", summary_line(&ranked.record));
        if show_scores {
            let _ = write!(out, " (score {})", ranked.score);
        }
        let _ = writeln!(out, "{}", detail_lines(&ranked.record));
    }
    out
}

pub fn render_stats(stats: &SearchStats) -> String {
    format!(
        "Totals: {} record(s), fine ${}, stars {}",
        stats.count,
        amount(stats.total_fine),
        stats.total_stars
    )
}
