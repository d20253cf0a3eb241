//! Immutable, pre-indexed record set built once per successful load.

use super::code::normalize_code;
use super::normalize::RecordNormalizer;
use crate::config::EngineConfig;
use crate::record::CanonicalRecord;
use crate::schema::coerce_records;
use ahash::AHashSet;
use serde_json::Value;

/// Lowercase + trim, the normalization applied to every compared field.
pub(crate) fn norm(text: &str) -> String {
    text.trim().to_lowercase()
}

/// A canonical record with its search keys precomputed.
#[derive(Debug, Clone)]
pub struct IndexedRecord {
    record: CanonicalRecord,
    /// Lowercased searchable fields joined by the configured separator.
    haystack: String,
    pub(crate) code: String,
    pub(crate) title: String,
    pub(crate) category: String,
    pub(crate) keywords: Vec<String>,
}

impl IndexedRecord {
    pub fn new(record: CanonicalRecord, separator: &str) -> Self {
        let haystack = build_haystack(&record, separator);
        Self {
            code: normalize_code(&record.id),
            title: norm(&record.title),
            category: record.category.as_deref().map(norm).unwrap_or_default(),
            keywords: record
                .keywords
                .iter()
                .map(|k| norm(k))
                .filter(|k| !k.is_empty())
                .collect(),
            haystack,
            record,
        }
    }

    pub const fn record(&self) -> &CanonicalRecord {
        &self.record
    }

    pub fn haystack(&self) -> &str {
        &self.haystack
    }
}

/// Concatenate id, title, category, description, notes and keywords, lowercased.
/// Empty parts are skipped.
pub fn build_haystack(record: &CanonicalRecord, separator: &str) -> String {
    let parts = [
        Some(record.id.as_str()),
        Some(record.title.as_str()),
        record.category.as_deref(),
        record.description.as_deref(),
        record.notes.as_deref(),
    ];

    parts
        .into_iter()
        .flatten()
        .chain(record.keywords.iter().map(String::as_str))
        .map(norm)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Ordered, read-only record set plus one haystack per record.
///
/// Rebuilding means constructing a new `Dataset`; nothing here mutates after
/// [`Dataset::build`] returns.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entries: Vec<IndexedRecord>,
    dropped: usize,
}

impl Dataset {
    /// Coerce, normalize and index a parsed JSON document.
    pub fn build(value: &Value, config: &EngineConfig) -> Self {
        let start = std::time::Instant::now();
        let raws = coerce_records(value, &config.wrapper_keys);

        let normalizer = RecordNormalizer::new(&config.aliases);
        let entries: Vec<IndexedRecord> = normalizer
            .normalize_all(raws)
            .map(|record| IndexedRecord::new(record, &config.haystack_separator))
            .collect();
        let dropped = raws.len() - entries.len();

        tracing::info!(
            "Built dataset: {} records ({} dropped) in {:?}",
            entries.len(),
            dropped,
            start.elapsed()
        );

        Self { entries, dropped }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entries rejected during the build.
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn entries(&self) -> &[IndexedRecord] {
        &self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &CanonicalRecord> {
        self.entries.iter().map(IndexedRecord::record)
    }

    /// First record whose normalized id equals the normalized `code`.
    pub fn find_by_code(&self, code: &str) -> Option<&CanonicalRecord> {
        let wanted = normalize_code(code);
        if wanted.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.code == wanted)
            .map(IndexedRecord::record)
    }

    /// Sorted, de-duplicated categories and keyword tags.
    pub fn categories(&self) -> Vec<String> {
        let unique: AHashSet<&str> = self
            .entries
            .iter()
            .flat_map(|entry| {
                std::iter::once(entry.category.as_str()).chain(entry.keywords.iter().map(String::as_str))
            })
            .filter(|tag| !tag.is_empty())
            .collect();

        let mut tags: Vec<String> = unique.into_iter().map(str::to_owned).collect();
        tags.sort_unstable();
        tags
    }
}
