//! Result ordering modes.
//!
//! All orderings use stable sorts, so ties keep their prior relative order:
//! relevance order for the secondary modes, dataset order for relevance.

use super::index::IndexedRecord;
use crate::record::CanonicalRecord;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A record paired with its relevance score for one search call.
#[derive(Debug, Clone, Copy)]
pub struct ScoredRecord<'d> {
    pub(crate) entry: &'d IndexedRecord,
    pub score: u32,
}

impl<'d> ScoredRecord<'d> {
    pub const fn new(entry: &'d IndexedRecord, score: u32) -> Self {
        Self { entry, score }
    }

    pub const fn record(&self) -> &'d CanonicalRecord {
        self.entry.record()
    }
}

/// Selectable result order.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Descending score.
    #[default]
    Relevance,
    /// Ascending normalized code, compared as strings.
    Code,
    /// Descending fine; unknown fines count as zero.
    #[value(name = "fine_desc", alias = "fine-desc")]
    FineDesc,
    /// Descending star rating on the 0-5 scale; unknown ratings count as zero.
    #[value(name = "stars_desc", alias = "stars-desc")]
    StarsDesc,
}

impl SortMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Code => "code",
            Self::FineDesc => "fine_desc",
            Self::StarsDesc => "stars_desc",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "relevance" => Ok(Self::Relevance),
            "code" => Ok(Self::Code),
            "fine_desc" | "fine" => Ok(Self::FineDesc),
            "stars_desc" | "stars" => Ok(Self::StarsDesc),
            other => Err(format!(
                "Unknown sort mode '{}'. Expected relevance, code, fine_desc or stars_desc",
                other
            )),
        }
    }
}

/// Order results: by relevance first, then stably by `mode`.
pub fn sort_results(results: &mut [ScoredRecord<'_>], mode: SortMode) {
    results.sort_by(|a, b| b.score.cmp(&a.score));

    match mode {
        SortMode::Relevance => {}
        SortMode::Code => results.sort_by(|a, b| a.entry.code.cmp(&b.entry.code)),
        SortMode::FineDesc => results.sort_by(|a, b| {
            b.record()
                .fine_or_zero()
                .total_cmp(&a.record().fine_or_zero())
        }),
        SortMode::StarsDesc => results.sort_by_key(|r| std::cmp::Reverse(r.record().star_rating())),
    }
}
