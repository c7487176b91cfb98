//! Packaging Scan Ledger
//!
//! Records scan events for packaging units as they pass handling stations
//! and answers history and dashboard queries over that record.
//!
//! # Modules
//!
//! - `types`: Core data structures (ScanEvent, ScanDraft, History)
//! - `validation`: Structural checks on scan drafts
//! - `event_store`: Durable, append-only scan sequence
//! - `scan_log`: Record, history and dashboard operations
//! - `api`: Axum HTTP adapter
//! - `config`: Environment-based server configuration
//! - `utils`: Atomic file writes and calendar helpers
//!
//! # Example
//!
//! ```no_run
//! use packaging_scan::{EventStoreConfig, HistoryQuery, ScanDraft, ScanLog};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let log = ScanLog::open(EventStoreConfig::new("data.json"))?;
//!     log.record(ScanDraft::new("WH", "PKG-0001").with_username("WH1"))?;
//!
//!     let history = log.history(&HistoryQuery::new("PKG-0001"))?;
//!     println!("{} scans", history.count);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod event_store;
pub mod scan_log;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items at crate root
pub use config::ServerConfig;
pub use error::{Field, ScanError, ScanResult, StorageError, StorageResult};
pub use event_store::{EventStore, EventStoreConfig};
pub use scan_log::ScanLog;
pub use types::{
    DashboardSummary, History, HistoryParams, HistoryQuery, ScanDraft, ScanEvent, ScanStatus,
    Station, ValidScan,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
