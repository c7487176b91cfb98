//! Scan event record and its closed value sets

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Handling stage that recorded a scan
///
/// Serialized as the short station code used by the scanning pages.
/// Unknown non-empty codes are kept verbatim so new stations can be
/// introduced without a schema change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Station {
    Warehouse,
    Supplier,
    Repair,
    Other(String),
}

impl Station {
    /// Wire code for this station
    pub fn as_str(&self) -> &str {
        match self {
            Station::Warehouse => "WH",
            Station::Supplier => "Supplier",
            Station::Repair => "Repair",
            Station::Other(code) => code,
        }
    }
}

impl From<String> for Station {
    fn from(code: String) -> Self {
        match code.as_str() {
            "WH" | "Warehouse" => Station::Warehouse,
            "Supplier" => Station::Supplier,
            "Repair" => Station::Repair,
            _ => Station::Other(code),
        }
    }
}

impl From<&str> for Station {
    fn from(code: &str) -> Self {
        Station::from(code.to_string())
    }
}

impl From<Station> for String {
    fn from(station: Station) -> Self {
        match station {
            Station::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing status of a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    #[default]
    Complete,
}

/// An immutable record of one packaging unit passing a station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEvent {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub station: Station,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub part_no: String,
    pub packaging_id: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub status: ScanStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_station_wire_codes() {
        assert_eq!(Station::from("WH"), Station::Warehouse);
        assert_eq!(Station::from("Warehouse"), Station::Warehouse);
        assert_eq!(Station::from("Repair"), Station::Repair);
        assert_eq!(Station::from("QC"), Station::Other("QC".to_string()));
        assert_eq!(String::from(Station::Warehouse), "WH");
        assert_eq!(Station::Other("QC".to_string()).to_string(), "QC");
    }

    #[test]
    fn test_scan_event_serializes_camel_case() {
        let event = ScanEvent {
            id: 1_700_000_000_000,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
            station: Station::Supplier,
            action: "IN".to_string(),
            supplier: "ACME".to_string(),
            part_no: "12345678901".to_string(),
            packaging_id: "PKG1".to_string(),
            remarks: String::new(),
            username: "SUPPLIER1".to_string(),
            status: ScanStatus::Complete,
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["packagingId"], json!("PKG1"));
        assert_eq!(value["partNo"], json!("12345678901"));
        assert_eq!(value["station"], json!("Supplier"));
        assert_eq!(value["status"], json!("complete"));
    }

    #[test]
    fn test_scan_event_optional_fields_default() {
        let event: ScanEvent = serde_json::from_value(json!({
            "id": 1,
            "timestamp": "2024-03-05T09:00:00.000Z",
            "station": "WH",
            "packagingId": "PKG1"
        }))
        .unwrap();

        assert_eq!(event.station, Station::Warehouse);
        assert!(event.part_no.is_empty());
        assert!(event.username.is_empty());
        assert_eq!(event.status, ScanStatus::Complete);
    }
}
