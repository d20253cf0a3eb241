//! The query pipeline: tokenize, score, filter, sort, truncate, summarize.
//!
//! [`QueryPipeline::search`] is pure over an immutable [`Dataset`]; repeating a
//! call with the same inputs yields the same outcome.

use super::index::{Dataset, IndexedRecord, norm};
use super::scoring::{QueryTerms, ScoringEngine};
use super::sort::{ScoredRecord, SortMode, sort_results};
use super::tokenize::{Tokenizer, normalize_query};
use crate::config::EngineConfig;
use crate::record::CanonicalRecord;
use serde::Serialize;
use std::fmt;

/// Status signal handed to the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Loading,
    Loaded,
    Error,
    EmptyQuery,
    NoMatch,
    Ok,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Error => "error",
            Self::EmptyQuery => "empty-query",
            Self::NoMatch => "no-match",
            Self::Ok => "ok",
        })
    }
}

/// Caller-selected knobs for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub mode: SortMode,
    /// `None` (or zero) falls back to the configured limit.
    pub limit: Option<usize>,
    /// Restrict to records whose category or a keyword equals this tag.
    pub category: Option<String>,
}

impl SearchOptions {
    pub const fn new(mode: SortMode, limit: Option<usize>) -> Self {
        Self {
            mode,
            limit,
            category: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// One returned record and the score it earned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    #[serde(flatten)]
    pub record: CanonicalRecord,
    pub score: u32,
}

/// Aggregates over the truncated result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SearchStats {
    pub count: usize,
    pub total_fine: f64,
    pub total_stars: u64,
}

impl SearchStats {
    fn collect(records: &[RankedRecord]) -> Self {
        Self {
            count: records.len(),
            total_fine: records.iter().map(|r| r.record.fine_or_zero()).sum(),
            total_stars: records
                .iter()
                .map(|r| u64::from(r.record.star_rating()))
                .sum(),
        }
    }
}

/// Ordered results plus their stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub records: Vec<RankedRecord>,
    pub stats: SearchStats,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// What a search produced. "Nothing typed yet" and "not loaded yet" are
/// distinct from "loaded, zero matches".
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// No dataset is available.
    NotReady,
    /// The query had no tokens.
    EmptyQuery,
    /// Ranked results, possibly empty.
    Matches(SearchResults),
}

impl SearchOutcome {
    /// Status for the rendering side. `NotReady` reports `Loading`; the state
    /// layer refines it to `Error` after a failed load.
    pub const fn status(&self) -> Status {
        match self {
            Self::NotReady => Status::Loading,
            Self::EmptyQuery => Status::EmptyQuery,
            Self::Matches(results) if results.records.is_empty() => Status::NoMatch,
            Self::Matches(_) => Status::Ok,
        }
    }

    pub const fn results(&self) -> Option<&SearchResults> {
        match self {
            Self::Matches(results) => Some(results),
            Self::NotReady | Self::EmptyQuery => None,
        }
    }
}

/// Orchestrates tokenizer, scorer and sorter under one configuration.
#[derive(Debug, Clone, Copy)]
pub struct QueryPipeline {
    tokenizer: Tokenizer,
    scoring: ScoringEngine,
    default_limit: usize,
}

impl QueryPipeline {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new(config.tokenizer),
            scoring: ScoringEngine::new(config.weights, config.inclusion),
            default_limit: config.limit.max(1),
        }
    }

    fn limit(&self, options: &SearchOptions) -> usize {
        options
            .limit
            .filter(|&limit| limit > 0)
            .unwrap_or(self.default_limit)
    }

    /// Score every record against `query` and return the ranked, truncated matches.
    pub fn search(&self, dataset: &Dataset, query: &str, options: &SearchOptions) -> SearchOutcome {
        let phrase = normalize_query(query);
        let terms = QueryTerms::new(&phrase, self.tokenizer.tokens(&phrase));
        if terms.is_empty() {
            return SearchOutcome::EmptyQuery;
        }

        let filter = CategoryFilter::new(options.category.as_deref());
        let mut scored: Vec<ScoredRecord<'_>> = dataset
            .entries()
            .iter()
            .filter(|entry| filter.admits(entry))
            .filter_map(|entry| {
                let score = self.scoring.score(&terms, entry);
                self.scoring
                    .qualifies(score, &terms, entry)
                    .then(|| ScoredRecord::new(entry, score))
            })
            .collect();

        tracing::debug!(
            "Query '{}' ({} tokens) matched {} of {} records",
            phrase,
            terms.tokens().len(),
            scored.len(),
            dataset.len()
        );

        sort_results(&mut scored, options.mode);
        SearchOutcome::Matches(self.finish(&scored, options))
    }

    /// Every record (after the category filter) in `mode` order, truncated.
    /// Lets callers show the full list when the query is empty.
    pub fn browse(&self, dataset: &Dataset, options: &SearchOptions) -> SearchResults {
        let filter = CategoryFilter::new(options.category.as_deref());
        let mut all: Vec<ScoredRecord<'_>> = dataset
            .entries()
            .iter()
            .filter(|entry| filter.admits(entry))
            .map(|entry| ScoredRecord::new(entry, 0))
            .collect();

        sort_results(&mut all, options.mode);
        self.finish(&all, options)
    }

    fn finish(&self, scored: &[ScoredRecord<'_>], options: &SearchOptions) -> SearchResults {
        let records: Vec<RankedRecord> = scored
            .iter()
            .take(self.limit(options))
            .map(|r| RankedRecord {
                record: r.record().clone(),
                score: r.score,
            })
            .collect();
        let stats = SearchStats::collect(&records);
        SearchResults { records, stats }
    }
}

/// Exact tag match against category or keywords. `"all"` disables filtering.
struct CategoryFilter(Option<String>);

impl CategoryFilter {
    fn new(raw: Option<&str>) -> Self {
        Self(raw.map(norm).filter(|tag| !tag.is_empty() && tag != "all"))
    }

    fn admits(&self, entry: &IndexedRecord) -> bool {
        self.0.as_deref().is_none_or(|tag| {
            entry.category == tag || entry.keywords.iter().any(|k| k == tag)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InclusionPolicy, TokenizerMode};
    use assert2::check;
    use rstest::rstest;
    use serde_json::json;

    fn dataset(config: &EngineConfig) -> Dataset {
        Dataset::build(
            &json!([
                {"id": "2.10.6", "title": "Evading", "fine": 1500, "stars": 3, "category": "felony",
                 "keywords": ["flee"]},
                {"id": "3.1", "title": "Robbery", "fine": 2500, "stars": 4, "category": "felony"},
                {"id": "4.2", "title": "Possession", "fine": null, "stars": 2, "category": "drugs",
                 "notes": "cocaine residue"},
                {"id": "5.5", "title": "Cocaine trafficking", "fine": 10000, "stars": 6,
                 "category": "drugs"}
            ]),
            config,
        )
    }

    fn ids(outcome: &SearchOutcome) -> Vec<String> {
        outcome
            .results()
            .map(|r| r.records.iter().map(|x| x.record.id.clone()).collect())
            .unwrap_or_default()
    }

    #[rstest]
    #[case("")]
    #[case("    ")]
    fn empty_query_is_distinct(#[case] query: &str) {
        let config = EngineConfig::default();
        let pipeline = QueryPipeline::new(&config);
        let outcome = pipeline.search(&dataset(&config), query, &SearchOptions::default());
        check!(outcome == SearchOutcome::EmptyQuery);
        check!(outcome.status() == Status::EmptyQuery);
    }

    #[test]
    fn punctuation_only_query_is_empty_under_strict() {
        let config = EngineConfig {
            tokenizer: TokenizerMode::Strict,
            ..EngineConfig::default()
        };
        let pipeline = QueryPipeline::new(&config);
        let outcome = pipeline.search(&dataset(&config), "?!", &SearchOptions::default());
        check!(outcome == SearchOutcome::EmptyQuery);
    }

    #[test]
    fn zero_matches_is_no_match() {
        let config = EngineConfig::default();
        let pipeline = QueryPipeline::new(&config);
        let outcome = pipeline.search(&dataset(&config), "arson", &SearchOptions::default());
        check!(outcome == SearchOutcome::Matches(SearchResults::default()));
        check!(outcome.status() == Status::NoMatch);
    }

    #[test]
    fn fallback_matches_rank_after_scored_ones() {
        let config = EngineConfig::default();
        let pipeline = QueryPipeline::new(&config);
        let outcome = pipeline.search(&dataset(&config), "cocaine", &SearchOptions::default());
        check!(ids(&outcome) == ["5.5", "4.2"]);

        let results = outcome.results().unwrap();
        check!(results.records[0].score > 0);
        check!(results.records[1].score == 0);
        check!(outcome.status() == Status::Ok);
    }

    #[test]
    fn fallback_can_be_disabled() {
        let config = EngineConfig {
            inclusion: InclusionPolicy {
                require_positive_score: true,
                fallback_substring: false,
            },
            ..EngineConfig::default()
        };
        let pipeline = QueryPipeline::new(&config);
        let outcome = pipeline.search(&dataset(&config), "cocaine", &SearchOptions::default());
        check!(ids(&outcome) == ["5.5"]);
    }

    #[test]
    fn stats_cover_truncated_results_only() {
        let config = EngineConfig::default();
        let pipeline = QueryPipeline::new(&config);
        let options = SearchOptions::new(SortMode::FineDesc, Some(2));
        let outcome = pipeline.search(&dataset(&config), "felony", &options);

        check!(ids(&outcome) == ["3.1", "2.10.6"]);
        let stats = outcome.results().unwrap().stats;
        check!(stats.count == 2);
        check!(stats.total_fine == 4000.0);
        check!(stats.total_stars == 7);
    }

    #[test]
    fn stars_total_uses_clamped_ratings() {
        let config = EngineConfig::default();
        let pipeline = QueryPipeline::new(&config);
        let outcome = pipeline.search(&dataset(&config), "drugs", &SearchOptions::default());
        let stats = outcome.results().unwrap().stats;
        // 6 stars clamps to 5; null fine counts as zero
        check!(stats.total_stars == 5 + 2);
        check!(stats.total_fine == 10000.0);
    }

    #[test]
    fn zero_limit_uses_configured_default() {
        let config = EngineConfig {
            limit: 1,
            ..EngineConfig::default()
        };
        let pipeline = QueryPipeline::new(&config);
        let outcome = pipeline.search(
            &dataset(&config),
            "felony",
            &SearchOptions::new(SortMode::Relevance, Some(0)),
        );
        check!(ids(&outcome).len() == 1);
    }

    #[test]
    fn category_filter_restricts_results() {
        let config = EngineConfig::default();
        let pipeline = QueryPipeline::new(&config);
        let data = dataset(&config);

        let options = SearchOptions::default().with_category("Drugs");
        check!(ids(&pipeline.search(&data, "cocaine", &options)) == ["5.5", "4.2"]);

        let options = SearchOptions::default().with_category("flee");
        check!(ids(&pipeline.search(&data, "felony", &options)) == ["2.10.6"]);

        let options = SearchOptions::default().with_category("all");
        check!(ids(&pipeline.search(&data, "felony", &options)).len() == 2);
    }

    #[test]
    fn browse_lists_everything_in_mode_order() {
        let config = EngineConfig::default();
        let pipeline = QueryPipeline::new(&config);
        let results = pipeline.browse(&dataset(&config), &SearchOptions::new(SortMode::StarsDesc, None));
        let ids: Vec<_> = results.records.iter().map(|r| r.record.id.as_str()).collect();
        check!(ids == ["5.5", "3.1", "2.10.6", "4.2"]);
        check!(results.stats.count == 4);
    }

    #[test]
    fn show_all_policy_includes_zero_scores() {
        let config = EngineConfig {
            inclusion: InclusionPolicy {
                require_positive_score: false,
                fallback_substring: false,
            },
            ..EngineConfig::default()
        };
        let pipeline = QueryPipeline::new(&config);
        let outcome = pipeline.search(&dataset(&config), "robbery", &SearchOptions::default());
        check!(ids(&outcome) == ["3.1", "2.10.6", "4.2", "5.5"]);
    }

    #[test]
    fn search_is_deterministic() {
        let config = EngineConfig::default();
        let pipeline = QueryPipeline::new(&config);
        let data = dataset(&config);
        let options = SearchOptions::new(SortMode::Code, Some(10));
        let first = pipeline.search(&data, "felony drugs", &options);
        let second = pipeline.search(&data, "felony drugs", &options);
        check!(first == second);
    }
}
