//! Canonical record shape shared by every record kind.

use serde::Serialize;

/// Raw dataset entry with unknown key names. Never mutated.
pub type RawRecord = serde_json::Value;

/// Highest star rating a record can display.
pub const MAX_STARS: i64 = 5;

/// The uniform, fully-mapped representation of a dataset entry.
///
/// Produced once per raw record by [`crate::search::normalize::RecordNormalizer`].
/// Missing numeric fields stay `None` so "unknown amount" is distinguishable
/// from "zero amount".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub keywords: Vec<String>,
    pub fine: Option<f64>,
    pub jail_minutes: Option<f64>,
    /// Stored as parsed; clamped only when read through [`Self::star_rating`].
    pub stars: Option<i64>,
    pub notes: Option<String>,
}

impl CanonicalRecord {
    /// Whether the record carries enough identity to be kept in a dataset.
    pub fn is_identifiable(&self) -> bool {
        !self.id.is_empty()
            || !self.title.is_empty()
            || self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Fine used for ordering and totals; unknown counts as zero.
    pub fn fine_or_zero(&self) -> f64 {
        self.fine.unwrap_or(0.0)
    }

    /// Star rating clamped to `0..=5`; unknown counts as zero.
    pub fn star_rating(&self) -> u8 {
        // Clamped into 0..=5 first, so the narrowing cast cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let stars = self.stars.unwrap_or(0).clamp(0, MAX_STARS) as u8;
        stars
    }
}
