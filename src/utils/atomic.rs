//! Atomic file operations
//!
//! Snapshots are replaced, never edited in place:
//!
//! 1. Write to a temporary file (`.tmp`)
//! 2. Call sync_all() to flush to disk
//! 3. Keep the current file as a backup, if requested
//! 4. Rename temp file to final path (atomic on most filesystems)
//!
//! A reader therefore sees either the old snapshot or the new one, never a
//! partial write.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Path of the temp file used while replacing `path`
pub fn temp_path_for(path: &Path) -> PathBuf {
    sibling_with_suffix(path, "tmp")
}

/// Path of the backup kept for `path`
pub fn backup_path_for(path: &Path) -> PathBuf {
    sibling_with_suffix(path, "bak")
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Atomically replace `path` with `content`
///
/// When `backup` is set the previous file (if any) is hard-linked to the
/// backup path before the rename, so the snapshot itself is never missing.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8], backup: Option<&Path>) -> io::Result<()> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path);

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&temp_path)?;
    if let Err(e) = file.write_all(content).and_then(|_| file.sync_all()) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    drop(file);

    if let Some(backup_path) = backup {
        if path.exists() {
            if backup_path.exists() {
                fs::remove_file(backup_path)?;
            }
            // Fall back to a copy on filesystems without hard links
            if fs::hard_link(path, backup_path).is_err() {
                fs::copy(path, backup_path)?;
            }
        }
    }

    fs::rename(&temp_path, path)
}

/// Remove a temp file left behind by an interrupted write
///
/// Returns `true` when a stale file was found and removed.
pub fn cleanup_temp_file<P: AsRef<Path>>(path: P) -> io::Result<bool> {
    let temp_path = temp_path_for(path.as_ref());
    match fs::remove_file(&temp_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
