//! Scan Log - the core service
//!
//! Ties the validation layer, the event store and the two query engines
//! together behind one handle that request handlers share.

mod dashboard;
mod history;
mod record;

use chrono::{DateTime, Local, TimeZone};
use tracing::debug;

use crate::error::{ScanResult, StorageResult};
use crate::event_store::{EventStore, EventStoreConfig};
use crate::types::{DashboardSummary, History, HistoryQuery, ScanDraft, ScanEvent};

pub use dashboard::summarize;
pub use history::history;

/// Scan ledger with thread-safe record and query operations
pub struct ScanLog {
    pub(crate) store: EventStore,
}

impl ScanLog {
    /// Open the ledger over the given store configuration
    pub fn open(config: EventStoreConfig) -> StorageResult<Self> {
        Ok(Self::with_store(EventStore::open(config)?))
    }

    pub fn with_store(store: EventStore) -> Self {
        Self { store }
    }

    /// Get the underlying event store
    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Record one scan
    pub fn record(&self, draft: ScanDraft) -> ScanResult<ScanEvent> {
        record::record(&self.store, draft)
    }

    /// Chronological history of one packaging unit
    pub fn history(&self, query: &HistoryQuery) -> ScanResult<History> {
        let result = self.store.with_scans(|scans| history::history(scans, query))?;
        debug!(
            packaging_id = %query.packaging_id,
            count = result.count,
            "history query"
        );
        Ok(result)
    }

    /// Today and this-month counts at the current local time
    pub fn summary(&self) -> DashboardSummary {
        self.summary_at(&Local::now())
    }

    /// Today and this-month counts relative to `now`
    pub fn summary_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardSummary {
        self.store.with_scans(|scans| dashboard::summarize(scans, now))
    }
}
