//! Utility functions and helpers
//!
//! This module contains atomic file writes and calendar/timestamp helpers.

pub mod atomic;
pub mod time;

pub use atomic::{atomic_write, backup_path_for, cleanup_temp_file, temp_path_for};
pub use time::{now_millis, parse_bound, parse_bound_in, truncate_to_millis, Window};
