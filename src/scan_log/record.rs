//! Record scan operation

use tracing::{debug, warn};

use crate::error::ScanResult;
use crate::event_store::EventStore;
use crate::types::{ScanDraft, ScanEvent};
use crate::validation::{station_warning, validate};

/// Validate a draft and append it to the store
///
/// Validation failures are returned before the store is touched.
pub fn record(store: &EventStore, draft: ScanDraft) -> ScanResult<ScanEvent> {
    let valid = validate(draft).map_err(|e| {
        debug!(error = %e, "scan rejected");
        e
    })?;

    if let Some(warning) = station_warning(&valid.station) {
        warn!(packaging_id = %valid.packaging_id, "{}", warning);
    }

    Ok(store.append(valid)?)
}
