//! History and dashboard query shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scan::ScanEvent;
use crate::utils::time::parse_bound;

/// History query string as received (`?packagingId=..&from=..&to=..`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    pub packaging_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl HistoryParams {
    /// Decode into a typed query
    ///
    /// Bounds that do not parse are dropped, not rejected.
    pub fn into_query(self) -> HistoryQuery {
        HistoryQuery {
            packaging_id: self.packaging_id.unwrap_or_default(),
            from: self.from.as_deref().and_then(parse_bound),
            to: self.to.as_deref().and_then(parse_bound),
        }
    }
}

/// Typed history query; both bounds are inclusive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub packaging_id: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl HistoryQuery {
    pub fn new(packaging_id: impl Into<String>) -> Self {
        Self {
            packaging_id: packaging_id.into(),
            ..Default::default()
        }
    }

    pub fn since(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn until(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }
}

/// History of one packaging unit, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub packaging_id: String,
    pub count: usize,
    pub results: Vec<ScanEvent>,
}

/// Calendar-bucketed scan counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_today: usize,
    pub total_month: usize,
}
