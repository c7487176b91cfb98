//! Event Store Module
//!
//! This module owns the only persisted state in the system:
//! - `EventStore`: in-memory scan sequence guarded by a single writer lock
//! - `snapshot`: codec and atomic replace for the `{ "scans": [...] }` file
//!
//! # Architecture
//!
//! ```text
//! Write Path (under write lock):
//! ┌──────────┐    ┌───────────────┐    ┌──────────────────┐    ┌────────────┐
//! │ValidScan │───►│ assign id/time│───►│ push to sequence │───►│ write .tmp │
//! └──────────┘    └───────────────┘    └──────────────────┘    │ fsync      │
//!                                              ▲               │ rename     │
//!                                              └── pop on err ─┴────────────┘
//!
//! Read Path (shared lock):
//! ┌──────────────┐
//! │ scan sequence│───► history / dashboard
//! └──────────────┘
//! ```

mod snapshot;
mod store;

pub use snapshot::{encode_snapshot, read_snapshot, write_snapshot};
pub use store::{EventStore, EventStoreConfig};
