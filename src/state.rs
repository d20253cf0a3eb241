//! Dataset lifecycle: unloaded → loading → loaded | error.
//!
//! [`RecordState`] owns the current immutable [`Dataset`] snapshot behind an
//! `Arc`. A reload builds a fresh dataset off to the side and swaps it in under
//! a short write lock; searches clone the `Arc` and run without holding a lock.

use crate::config::EngineConfig;
use crate::error::LoadError;
use crate::fingerprint::Fingerprint;
use crate::loader::{self, RawSource};
use crate::search::{Dataset, QueryPipeline, SearchOptions, SearchOutcome, SearchResults, Status};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the dataset is in its lifecycle.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded {
        dataset: Arc<Dataset>,
        fingerprint: Fingerprint,
        origin: Option<PathBuf>,
    },
    Failed(String),
}

impl LoadState {
    pub const fn status(&self) -> Status {
        match self {
            Self::Unloaded | Self::Loading => Status::Loading,
            Self::Loaded { .. } => Status::Loaded,
            Self::Failed(_) => Status::Error,
        }
    }
}

/// Summary of a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub records: usize,
    pub dropped: usize,
    pub fingerprint: Fingerprint,
    /// True when the source was unchanged and the existing dataset was kept.
    pub reused: bool,
}

/// Shared engine state: configuration, pipeline and the current dataset.
#[derive(Debug)]
pub struct RecordState {
    config: EngineConfig,
    pipeline: QueryPipeline,
    state: RwLock<LoadState>,
}

impl RecordState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            pipeline: QueryPipeline::new(&config),
            config,
            state: RwLock::new(LoadState::Unloaded),
        }
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.state.read().status()
    }

    /// Current lifecycle state (cloned; datasets are shared, not copied).
    pub fn load_state(&self) -> LoadState {
        self.state.read().clone()
    }

    /// The loaded dataset, if any.
    pub fn snapshot(&self) -> Option<Arc<Dataset>> {
        match &*self.state.read() {
            LoadState::Loaded { dataset, .. } => Some(Arc::clone(dataset)),
            _ => None,
        }
    }

    /// Path of the loaded source, if it came from a file.
    pub fn origin(&self) -> Option<PathBuf> {
        match &*self.state.read() {
            LoadState::Loaded { origin, .. } => origin.clone(),
            _ => None,
        }
    }

    /// Mark a load as started. A loaded dataset keeps serving until the swap.
    pub fn begin_load(&self) {
        let mut state = self.state.write();
        if !matches!(*state, LoadState::Loaded { .. }) {
            *state = LoadState::Loading;
        }
    }

    /// Finish a load with whatever the transport produced.
    ///
    /// Failure discards any previous dataset: searches answer "not ready" until
    /// a later load succeeds.
    pub fn complete_load(
        &self,
        source: Result<RawSource, LoadError>,
    ) -> Result<LoadReport, LoadError> {
        let source = match source {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!("Dataset load failed: {}", err);
                *self.state.write() = LoadState::Failed(err.to_string());
                return Err(err);
            }
        };

        if let LoadState::Loaded {
            dataset,
            fingerprint,
            ..
        } = &*self.state.read()
            && *fingerprint == source.fingerprint
        {
            tracing::debug!("Dataset source unchanged ({}), keeping current index", fingerprint);
            return Ok(LoadReport {
                records: dataset.len(),
                dropped: dataset.dropped(),
                fingerprint: *fingerprint,
                reused: true,
            });
        }

        // Build outside the lock; only the swap is exclusive.
        let dataset = Arc::new(Dataset::build(&source.value, &self.config));
        let report = LoadReport {
            records: dataset.len(),
            dropped: dataset.dropped(),
            fingerprint: source.fingerprint,
            reused: false,
        };

        *self.state.write() = LoadState::Loaded {
            dataset,
            fingerprint: source.fingerprint,
            origin: source.origin,
        };

        Ok(report)
    }

    /// Read, parse and install a dataset file.
    pub async fn load_file(&self, path: &Path) -> Result<LoadReport, LoadError> {
        self.begin_load();
        let source = loader::read_json(path).await;
        self.complete_load(source)
    }

    /// Run a search against the current snapshot.
    pub fn search(&self, query: &str, options: &SearchOptions) -> SearchOutcome {
        match self.snapshot() {
            Some(dataset) => self.pipeline.search(&dataset, query, options),
            None => SearchOutcome::NotReady,
        }
    }

    /// All records in `options.mode` order, or `None` before a dataset is loaded.
    pub fn browse(&self, options: &SearchOptions) -> Option<SearchResults> {
        self.snapshot()
            .map(|dataset| self.pipeline.browse(&dataset, options))
    }

    /// Status for an outcome, resolving "not ready" to loading or error.
    pub fn status_of(&self, outcome: &SearchOutcome) -> Status {
        match outcome {
            SearchOutcome::NotReady => self.status(),
            other => other.status(),
        }
    }
}
