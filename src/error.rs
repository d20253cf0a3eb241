//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for penal-search plumbing (CLI, tool handlers).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods. The search engine itself never fails.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when the raw dataset cannot be fetched or parsed.
///
/// Any of these leaves the dataset unloaded; searches answer "not ready" until
/// a later load succeeds.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The dataset file could not be read.
    #[error("Failed to read dataset at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The dataset file is not valid JSON.
    #[error("Failed to parse dataset at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Any other transport failure reported by the caller.
    #[error("Dataset transport failed: {message}")]
    Transport { message: String },
}

/// Error returned when loading or validating an engine configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{message}")]
    Validation { message: String },
}
