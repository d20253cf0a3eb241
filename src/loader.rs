//! Dataset transport: fetch raw bytes and parse them as JSON.
//!
//! The search engine never performs I/O; this is the collaborator that feeds it.

use crate::error::LoadError;
use crate::fingerprint::Fingerprint;
use serde_json::Value;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// A parsed dataset document plus the fingerprint of its bytes.
#[derive(Debug, Clone)]
pub struct RawSource {
    pub value: Value,
    pub fingerprint: Fingerprint,
    pub origin: Option<PathBuf>,
}

impl RawSource {
    /// Parse in-memory bytes. `origin` only labels errors and logs.
    pub fn from_bytes(bytes: &[u8], origin: Option<&Path>) -> Result<Self, LoadError> {
        let value = serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
            path: origin.map_or_else(|| PathBuf::from("<memory>"), Path::to_path_buf),
            source,
        })?;

        Ok(Self {
            value,
            fingerprint: Fingerprint::of(bytes),
            origin: origin.map(Path::to_path_buf),
        })
    }

    /// Wrap an already-parsed value, fingerprinting its serialized form.
    pub fn from_value(value: Value) -> Self {
        let fingerprint = Fingerprint::of(value.to_string().as_bytes());
        Self {
            value,
            fingerprint,
            origin: None,
        }
    }
}

/// Read and parse a JSON dataset file.
pub async fn read_json(path: &Path) -> Result<RawSource, LoadError> {
    let path = PathBuf::from(expand_tilde(&path.to_string_lossy()).as_ref());
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;

    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    RawSource::from_bytes(&bytes, Some(&path))
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
