//! Content fingerprints for dataset sources.
//!
//! A reload whose bytes hash the same as the loaded source keeps the current
//! dataset instead of rebuilding it.

use std::fmt;
use xxhash_rust::xxh3::xxh3_64;

/// xxh3 hash of raw source bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn of(bytes: &[u8]) -> Self {
        Self(xxh3_64(bytes))
    }

    /// Returns the hash as a lowercase hexadecimal string
    pub fn as_hex(self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}
