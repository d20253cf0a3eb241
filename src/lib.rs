//! Ranked lookup over small in-memory record sets (legal codes, violations,
//! situational playbooks), exposed as a library, an MCP server and a CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod format;
pub mod loader;
pub mod record;
pub mod schema;
pub mod search;
pub mod server;
pub mod state;
pub mod tools;
pub mod tracing;

pub use config::{EngineConfig, RecordKind, TokenizerMode};
pub use error::{ConfigError, LoadError};
pub use record::{CanonicalRecord, RawRecord};
pub use search::{
    Dataset, QueryPipeline, SearchOptions, SearchOutcome, SearchResults, SearchStats, SortMode,
    Status,
};
pub use state::{LoadState, RecordState};
