//! Schema normalization and weighted search over an in-memory record set.
//!
//! This module provides code normalization, query tokenization, record
//! normalization, indexing, scoring, ordering and the query pipeline that ties
//! them together.

// Module declarations
pub mod code;
pub mod index;
pub mod normalize;
pub mod query;
pub mod scoring;
pub mod sort;
pub mod tokenize;

// Public re-exports (used via lib.rs)
pub use code::normalize_code;
pub use index::{Dataset, IndexedRecord, build_haystack};
pub use normalize::RecordNormalizer;
pub use query::{
    QueryPipeline, RankedRecord, SearchOptions, SearchOutcome, SearchResults, SearchStats, Status,
};
pub use scoring::{QueryTerms, ScoringEngine};
pub use sort::{ScoredRecord, SortMode, sort_results};
pub use tokenize::{Tokenizer, Tokens, normalize_query};
