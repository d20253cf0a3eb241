//! Weighted relevance scoring of records against query tokens.
//!
//! Signals and their default weights:
//! - exact code: 100 (all tokens concatenated, normalized, equal the record code)
//! - title exact: 40, title substring: 12
//! - keyword exact: 18, keyword partial: 6 (either contains the other)
//! - category substring: 6
//! - code partial: 10 (normalized token inside the record code)
//!
//! Every applicable signal is summed over every token.

use super::code::normalize_code;
use super::index::IndexedRecord;
use crate::config::{InclusionPolicy, Weights};

/// A tokenized query with its code forms computed once.
#[derive(Debug, Clone)]
pub struct QueryTerms<'q> {
    phrase: &'q str,
    tokens: Vec<&'q str>,
    token_codes: Vec<String>,
    joined_code: String,
}

impl<'q> QueryTerms<'q> {
    /// `phrase` is the normalized query; `tokens` come from it.
    pub fn new(phrase: &'q str, tokens: impl IntoIterator<Item = &'q str>) -> Self {
        let tokens: Vec<&str> = tokens.into_iter().collect();
        let token_codes = tokens.iter().map(|t| normalize_code(t)).collect();
        let joined_code = normalize_code(&tokens.concat());
        Self {
            phrase,
            tokens,
            token_codes,
            joined_code,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[&'q str] {
        &self.tokens
    }
}

/// Applies a [`Weights`] table and an [`InclusionPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    weights: Weights,
    inclusion: InclusionPolicy,
}

impl ScoringEngine {
    pub const fn new(weights: Weights, inclusion: InclusionPolicy) -> Self {
        Self { weights, inclusion }
    }

    /// Sum of every matching signal. Zero means no weighted match.
    pub fn score(&self, terms: &QueryTerms<'_>, entry: &IndexedRecord) -> u32 {
        let w = &self.weights;
        let mut score = 0u32;
        let mut add = |hit: bool, weight: u32| {
            if hit {
                score = score.saturating_add(weight);
            }
        };

        add(
            !terms.joined_code.is_empty() && terms.joined_code == entry.code,
            w.exact_code,
        );

        for (token, token_code) in terms.tokens.iter().zip(&terms.token_codes) {
            let token = *token;

            add(entry.title == token, w.title_exact);
            add(entry.title.contains(token), w.title_substring);

            add(entry.keywords.iter().any(|k| k == token), w.keyword_exact);
            add(
                entry
                    .keywords
                    .iter()
                    .any(|k| k.contains(token) || token.contains(k.as_str())),
                w.keyword_partial,
            );

            add(entry.category.contains(token), w.category_substring);

            // A token with no digits normalizes to "", which every code would contain.
            add(
                !token_code.is_empty() && entry.code.contains(token_code.as_str()),
                w.code_partial,
            );
        }

        score
    }

    /// Whether a scored record belongs in ranked output.
    pub fn qualifies(&self, score: u32, terms: &QueryTerms<'_>, entry: &IndexedRecord) -> bool {
        score > 0
            || !self.inclusion.require_positive_score
            || (self.inclusion.fallback_substring && entry.haystack().contains(terms.phrase))
    }
}
