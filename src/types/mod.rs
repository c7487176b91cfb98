//! Data types for the packaging scan ledger
//!
//! This module contains all the core data structures used throughout the application.

mod draft;
mod query;
mod scan;

pub use draft::{ScanDraft, ValidScan};
pub use query::{DashboardSummary, History, HistoryParams, HistoryQuery};
pub use scan::{ScanEvent, ScanStatus, Station};
