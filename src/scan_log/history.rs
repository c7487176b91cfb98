//! Unit history query

use crate::error::{Field, ScanError, ScanResult};
use crate::types::{History, HistoryQuery, ScanEvent};

/// Scans for one packaging unit, oldest first
///
/// Matches `packaging_id` exactly. Both bounds are inclusive. Scans with the
/// same timestamp keep their insertion order.
pub fn history(scans: &[ScanEvent], query: &HistoryQuery) -> ScanResult<History> {
    if query.packaging_id.trim().is_empty() {
        return Err(ScanError::MissingField(Field::PackagingId));
    }

    let mut results: Vec<ScanEvent> = scans
        .iter()
        .filter(|s| s.packaging_id == query.packaging_id)
        .filter(|s| query.from.map_or(true, |from| s.timestamp >= from))
        .filter(|s| query.to.map_or(true, |to| s.timestamp <= to))
        .cloned()
        .collect();

    // sort_by_key is stable
    results.sort_by_key(|s| s.timestamp);

    Ok(History {
        packaging_id: query.packaging_id.clone(),
        count: results.len(),
        results,
    })
}
