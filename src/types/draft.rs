//! Request-side shapes: untrusted drafts and their validated form

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::scan::Station;

/// A scan submission as decoded from the request body
///
/// Every field is optional here; the validation layer decides what is
/// required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanDraft {
    pub station: Option<String>,
    pub packaging_id: Option<String>,
    pub part_no: Option<String>,
    pub action: Option<String>,
    pub supplier: Option<String>,
    pub remarks: Option<String>,
    pub username: Option<String>,
}

impl ScanDraft {
    /// Minimal draft with the two required fields set
    pub fn new(station: impl Into<String>, packaging_id: impl Into<String>) -> Self {
        Self {
            station: Some(station.into()),
            packaging_id: Some(packaging_id.into()),
            ..Default::default()
        }
    }

    pub fn with_part_no(mut self, part_no: impl Into<String>) -> Self {
        self.part_no = Some(part_no.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// A draft that passed validation and is ready to be appended
///
/// `id` and `timestamp` are assigned by the store unless preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidScan {
    pub id: Option<u64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub station: Station,
    pub packaging_id: String,
    pub part_no: String,
    pub action: String,
    pub supplier: String,
    pub remarks: String,
    pub username: String,
}

impl ValidScan {
    /// Pin the creation instant instead of using the append time
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
