//! Dashboard counts over calendar windows

use chrono::{DateTime, TimeZone};

use crate::types::{DashboardSummary, ScanEvent};
use crate::utils::Window;

/// Count scans in the local day and month containing `now`
///
/// Each scan is tested against both windows independently.
pub fn summarize<Tz: TimeZone>(scans: &[ScanEvent], now: &DateTime<Tz>) -> DashboardSummary {
    let day = Window::day_of(now);
    let month = Window::month_of(now);

    scans
        .iter()
        .fold(DashboardSummary::default(), |mut summary, scan| {
            if day.contains(&scan.timestamp) {
                summary.total_today += 1;
            }
            if month.contains(&scan.timestamp) {
                summary.total_month += 1;
            }
            summary
        })
}
