//! Structural rules for scan drafts

use std::ops::RangeInclusive;

use crate::error::{Field, ScanError, ScanResult};
use crate::types::{ScanDraft, Station, ValidScan};

/// Station codes used by the scanning pages
pub const STANDARD_STATIONS: &[&str] = &["WH", "Supplier", "Repair"];

/// Allowed part number length, in characters, when one is given
pub const PART_NO_LEN: RangeInclusive<usize> = 11..=14;

/// Check a draft and normalize it for appending
///
/// Rules are applied in a fixed order and the first failure wins:
/// packagingId, then station, then partNo.
///
/// Blank checks and the partNo length look at trimmed text, but a
/// non-blank `packaging_id` or `part_no` is kept exactly as submitted.
/// The packaging id is the exact-match key for history lookups.
pub fn validate(draft: ScanDraft) -> ScanResult<ValidScan> {
    let packaging_id = required(draft.packaging_id, Field::PackagingId)?;
    let station = required(draft.station, Field::Station)?;

    let mut part_no = draft.part_no.unwrap_or_default();
    let len = part_no.trim().chars().count();
    if len == 0 {
        part_no.clear();
    } else if !PART_NO_LEN.contains(&len) {
        return Err(ScanError::InvalidPartNoLength { len });
    }

    Ok(ValidScan {
        id: None,
        timestamp: None,
        station: Station::from(station.trim()),
        packaging_id,
        part_no,
        action: draft.action.unwrap_or_default(),
        supplier: draft.supplier.unwrap_or_default(),
        remarks: draft.remarks.unwrap_or_default(),
        username: draft.username.unwrap_or_default(),
    })
}

fn required(value: Option<String>, field: Field) -> ScanResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ScanError::MissingField(field)),
    }
}

/// Check if station is standard, return warning if not
pub fn station_warning(station: &Station) -> Option<String> {
    match station {
        Station::Other(code) => Some(format!(
            "Non-standard station '{}'. Recommended: {:?}",
            code, STANDARD_STATIONS
        )),
        _ => None,
    }
}
