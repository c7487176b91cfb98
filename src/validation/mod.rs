//! Validation layer for scan submissions
//!
//! Every draft passes through here before it can reach the event store.

mod rules;

pub use rules::{station_warning, validate, PART_NO_LEN, STANDARD_STATIONS};
