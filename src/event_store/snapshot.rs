//! Snapshot codec for the durable scan file
//!
//! The file holds a single JSON document:
//!
//! ```text
//! { "scans": [ { "id": ..., "timestamp": ..., ... }, ... ] }
//! ```
//!
//! It is rewritten in full on every append via an atomic replace.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};
use crate::types::ScanEvent;
use crate::utils::atomic_write;

#[derive(Debug, Default, Deserialize)]
struct ScanSnapshot {
    #[serde(default)]
    scans: Vec<ScanEvent>,
}

#[derive(Serialize)]
struct ScanSnapshotRef<'a> {
    scans: &'a [ScanEvent],
}

/// Read the snapshot at `path`
///
/// Returns `Ok(None)` when the file does not exist. Any other failure,
/// including an undecodable document, is an error.
pub fn read_snapshot(path: &Path) -> StorageResult<Option<Vec<ScanEvent>>> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::io(path, e)),
    };

    let snapshot: ScanSnapshot =
        serde_json::from_slice(&raw).map_err(|source| StorageError::Corrupted {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Some(snapshot.scans))
}

/// Serialize the full scan sequence
pub fn encode_snapshot(scans: &[ScanEvent]) -> StorageResult<Vec<u8>> {
    serde_json::to_vec_pretty(&ScanSnapshotRef { scans }).map_err(StorageError::Encode)
}

/// Atomically replace the snapshot at `path` with `encoded`
pub fn write_snapshot(path: &Path, encoded: &[u8], backup: Option<&Path>) -> StorageResult<()> {
    atomic_write(path, encoded, backup).map_err(|e| StorageError::io(path, e))
}
