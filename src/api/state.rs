//! Shared application state for request handlers

use std::sync::Arc;

use crate::scan_log::ScanLog;

pub struct AppState {
    /// The scan ledger
    pub log: Arc<ScanLog>,
}

impl AppState {
    pub fn new(log: Arc<ScanLog>) -> Self {
        Self { log }
    }
}
