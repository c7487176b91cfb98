//! API module for HTTP endpoints
//!
//! Thin transport over [`ScanLog`](crate::scan_log::ScanLog): requests are
//! decoded into typed drafts and queries, results and errors are rendered as
//! `{ "ok": ... }` JSON bodies.

pub mod http;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
