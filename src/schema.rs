//! Extraction of the raw record array from a JSON document of unknown shape.

use crate::record::RawRecord;
use serde_json::Value;

/// Return the record array held by `value`.
///
/// A bare array is returned as-is. Otherwise the first of `wrapper_keys` whose
/// value is an array wins. Anything else yields an empty slice: absent data is
/// not an error at this layer.
pub fn coerce_records<'a, S: AsRef<str>>(value: &'a Value, wrapper_keys: &[S]) -> &'a [RawRecord] {
    if let Value::Array(items) = value {
        return items;
    }

    let Value::Object(map) = value else {
        return &[];
    };

    wrapper_keys
        .iter()
        .find_map(|key| map.get(key.as_ref()).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or_default()
}
