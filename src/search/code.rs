//! Canonicalization of identifier-like strings for code comparison.
//!
//! Stored codes and query fragments go through the same function, so a user
//! typing `PC 2.10.6`, `pc-2.10.6` or `2.10.6` lands on the same key.

/// Prefixes stripped from the start of a code. Longest first so `pc.` wins over `pc`.
const CODE_PREFIXES: &[&str] = &["pc.", "pc:", "pc-", "pc"];

/// Normalize a code: lowercase, drop whitespace, strip one `pc` prefix, then keep
/// only ASCII digits and dots.
pub fn normalize_code(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    let unprefixed = CODE_PREFIXES
        .iter()
        .find_map(|prefix| compact.strip_prefix(prefix))
        .unwrap_or(&compact);

    unprefixed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}
