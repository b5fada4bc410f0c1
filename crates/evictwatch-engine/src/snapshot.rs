//! Shared read-only access to the loaded record set.

use std::sync::{Arc, RwLock};

use evictwatch_core::{FilingSet, Selection, SummaryConfig, WindowError};
use tracing::{debug, info};

use crate::EngineError;
use crate::aggregate::compute_summary;
use crate::summary::Summary;

/// Holds the current [`FilingSet`] behind an `Arc`.
///
/// Readers take a snapshot and keep it for the whole computation; a reload
/// swaps the `Arc` without touching sets already handed out.
#[derive(Debug, Default)]
pub struct Snapshot {
    current: RwLock<Arc<FilingSet>>,
}

impl Snapshot {
    pub fn new(filings: FilingSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(filings)),
        }
    }

    pub fn load(&self) -> Arc<FilingSet> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Install a new set, returning the one it replaced.
    pub fn replace(&self, filings: FilingSet) -> Arc<FilingSet> {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        info!(filings = filings.len(), "replacing filing snapshot");
        std::mem::replace(&mut *guard, Arc::new(filings))
    }
}

/// Summary engine: a filing snapshot plus its configuration.
#[derive(Debug, Default)]
pub struct Engine {
    snapshot: Snapshot,
    config: SummaryConfig,
}

impl Engine {
    pub fn new(filings: FilingSet, config: SummaryConfig) -> Self {
        Self {
            snapshot: Snapshot::new(filings),
            config,
        }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    pub fn filings(&self) -> Arc<FilingSet> {
        self.snapshot.load()
    }

    pub fn reload(&self, filings: FilingSet) {
        self.snapshot.replace(filings);
    }

    /// Default selection over the current snapshot.
    pub fn default_selection(&self) -> Result<Selection, EngineError> {
        let span = self
            .snapshot
            .load()
            .date_span()
            .ok_or(WindowError::EmptyDataset)?;
        Ok(self.config.default_selection(span))
    }

    /// Validate `selection` against the data span and compute its summary.
    ///
    /// Validation failures return before any aggregation runs.
    pub fn summarize(&self, selection: &Selection) -> Result<Summary, EngineError> {
        let filings = self.snapshot.load();
        let span = filings.date_span().ok_or(WindowError::EmptyDataset)?;
        let windows = selection.windows(span)?;
        debug!(start = %selection.start, end = %selection.end, "summarizing selection");
        Ok(compute_summary(
            filings.filings(),
            &selection.counties,
            &windows,
            self.config.top_n,
        ))
    }
}
