//! Mapping of heterogeneous raw records onto [`CanonicalRecord`].
//!
//! Each canonical field is read from the first alias key present in the raw
//! object (`null` counts as absent). The alias lists come from configuration;
//! nothing is inferred from the data.

use crate::config::AliasTable;
use crate::record::{CanonicalRecord, RawRecord};
use serde_json::Value;

/// Separator used when an array of scalars fills a text field.
const LIST_JOINER: &str = "; ";

/// Stateless mapper from raw records to canonical ones.
#[derive(Debug, Clone, Copy)]
pub struct RecordNormalizer<'a> {
    aliases: &'a AliasTable,
}

impl<'a> RecordNormalizer<'a> {
    pub const fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    /// Map one raw record. Returns `None` when id, title and description are all empty.
    pub fn normalize(&self, raw: &RawRecord) -> Option<CanonicalRecord> {
        let aliases = self.aliases;
        let field = |keys: &[String]| first_present(raw, keys);

        let record = CanonicalRecord {
            id: field(&aliases.id).and_then(coerce_text).unwrap_or_default(),
            title: field(&aliases.title).and_then(coerce_text).unwrap_or_default(),
            description: field(&aliases.description).and_then(coerce_text),
            category: field(&aliases.category).and_then(coerce_text),
            keywords: field(&aliases.keywords).map(coerce_keywords).unwrap_or_default(),
            fine: field(&aliases.fine).and_then(coerce_number),
            jail_minutes: field(&aliases.jail_minutes).and_then(coerce_number),
            stars: field(&aliases.stars).and_then(coerce_number).map(round_stars),
            notes: field(&aliases.notes).and_then(coerce_text),
        };

        record.is_identifiable().then_some(record)
    }

    /// Map a sequence in order, silently dropping unidentifiable entries.
    pub fn normalize_all<'r>(
        &self,
        raws: &'r [RawRecord],
    ) -> impl Iterator<Item = CanonicalRecord> + use<'a, 'r> {
        let normalizer = *self;
        raws.iter().enumerate().filter_map(move |(position, raw)| {
            let record = normalizer.normalize(raw);
            if record.is_none() {
                tracing::trace!("Dropping raw record #{} without id, title or description", position);
            }
            record
        })
    }
}

fn first_present<'v>(raw: &'v RawRecord, keys: &[String]) -> Option<&'v Value> {
    let object = raw.as_object()?;
    keys.iter()
        .find_map(|key| object.get(key).filter(|value| !value.is_null()))
}

/// Scalar → trimmed string; array of scalars → joined; objects and blanks → `None`.
fn coerce_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join(LIST_JOINER),
        other => scalar_text(other)?,
    };

    (!text.is_empty()).then_some(text)
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    (!text.is_empty()).then_some(text)
}

fn coerce_keywords(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

/// Permissive numeric parse: `"$1,500"` → 1500. Anything unparseable is `None`, never zero.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !c.is_whitespace() && !matches!(c, '$' | ',' | '_'))
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok()?
        }
        _ => return None,
    };

    number.is_finite().then_some(number)
}

#[allow(clippy::cast_possible_truncation)]
fn round_stars(stars: f64) -> i64 {
    // Float → int casts saturate, so out-of-range ratings cannot wrap.
    stars.round() as i64
}
