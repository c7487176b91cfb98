//! Event Store - durable owner of the scan sequence
//!
//! The store keeps every scan in memory in insertion order and mirrors the
//! whole sequence to a single snapshot file on each append. All appends go
//! through one write lock, so read-modify-write cycles never interleave and
//! readers never see a sequence that is not also on disk.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use super::snapshot::{encode_snapshot, read_snapshot, write_snapshot};
use crate::error::{StorageError, StorageResult};
use crate::types::{ScanEvent, ScanStatus, ValidScan};
use crate::utils::{backup_path_for, cleanup_temp_file, now_millis, temp_path_for};

/// Configuration for the EventStore
#[derive(Debug, Clone)]
pub struct EventStoreConfig {
    /// Path to the snapshot file
    pub data_file: PathBuf,
    /// Attempts per durable write before the append is abandoned
    pub write_attempts: u32,
    /// Base delay between attempts, multiplied by the attempt number
    pub write_backoff: Duration,
    /// Whether to keep the previous snapshot as `<file>.bak`
    pub keep_backup: bool,
}

impl Default for EventStoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.json"),
            write_attempts: 3,
            write_backoff: Duration::from_millis(50),
            keep_backup: true,
        }
    }
}

impl EventStoreConfig {
    /// Create config with a custom snapshot file
    pub fn new<P: AsRef<Path>>(data_file: P) -> Self {
        Self {
            data_file: data_file.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Override the retry policy for durable writes
    pub fn with_retry(mut self, attempts: u32, backoff: Duration) -> Self {
        self.write_attempts = attempts;
        self.write_backoff = backoff;
        self
    }

    pub fn with_backup(mut self, keep_backup: bool) -> Self {
        self.keep_backup = keep_backup;
        self
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Get path of the in-flight temp file
    pub fn temp_path(&self) -> PathBuf {
        temp_path_for(&self.data_file)
    }

    /// Get path of the previous snapshot
    pub fn backup_path(&self) -> PathBuf {
        backup_path_for(&self.data_file)
    }
}

struct Ledger {
    scans: Vec<ScanEvent>,
    last_id: u64,
}

/// Append-only store of scan events backed by a snapshot file
pub struct EventStore {
    config: EventStoreConfig,
    ledger: RwLock<Ledger>,
}

impl EventStore {
    /// Open the store, loading the snapshot if it exists
    ///
    /// A missing snapshot means nothing has been recorded yet. A snapshot
    /// that exists but cannot be read or decoded is an error.
    pub fn open(config: EventStoreConfig) -> StorageResult<Self> {
        let data_file = config.data_file().to_path_buf();

        if cleanup_temp_file(&data_file).map_err(|e| StorageError::io(config.temp_path(), e))? {
            warn!(path = %config.temp_path().display(), "removed temp file left by an interrupted write");
        }

        let scans = match read_snapshot(&data_file) {
            Ok(Some(scans)) => scans,
            Ok(None) => {
                info!(path = %data_file.display(), "no snapshot found, starting empty");
                Vec::new()
            }
            Err(e) => {
                error!(path = %data_file.display(), error = %e, "failed to load snapshot");
                return Err(e);
            }
        };

        let last_id = scans.iter().map(|s| s.id).max().unwrap_or(0);
        info!(
            path = %data_file.display(),
            scans = scans.len(),
            "event store loaded"
        );

        Ok(Self {
            config,
            ledger: RwLock::new(Ledger { scans, last_id }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &EventStoreConfig {
        &self.config
    }

    /// Append a validated scan and persist the whole sequence
    ///
    /// Assigns `id` and `timestamp` when the scan does not carry them. If
    /// the durable write fails the in-memory sequence is restored to its
    /// prior state before the error is returned.
    pub fn append(&self, scan: ValidScan) -> StorageResult<ScanEvent> {
        let mut ledger = self.ledger.write();

        let timestamp = scan.timestamp.unwrap_or_else(now_millis);
        let id = match scan.id {
            Some(id) if !ledger.scans.iter().any(|s| s.id == id) => id,
            _ => next_id(ledger.last_id, timestamp.timestamp_millis()).ok_or(
                StorageError::IdSpaceExhausted {
                    last_id: ledger.last_id,
                },
            )?,
        };

        let event = ScanEvent {
            id,
            timestamp,
            station: scan.station,
            action: scan.action,
            supplier: scan.supplier,
            part_no: scan.part_no,
            packaging_id: scan.packaging_id,
            remarks: scan.remarks,
            username: scan.username,
            status: ScanStatus::Complete,
        };

        ledger.scans.push(event.clone());
        if let Err(e) = self.persist(&ledger.scans) {
            ledger.scans.pop();
            return Err(e);
        }
        ledger.last_id = ledger.last_id.max(id);

        debug!(
            id = event.id,
            packaging_id = %event.packaging_id,
            station = %event.station,
            "scan appended"
        );
        Ok(event)
    }

    /// Every stored scan in insertion order
    pub fn load_all(&self) -> Vec<ScanEvent> {
        self.ledger.read().scans.clone()
    }

    /// Run `f` over the stored scans without cloning them
    ///
    /// Appends wait until `f` returns.
    pub fn with_scans<R>(&self, f: impl FnOnce(&[ScanEvent]) -> R) -> R {
        f(&self.ledger.read().scans)
    }

    pub fn len(&self) -> usize {
        self.ledger.read().scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, scans: &[ScanEvent]) -> StorageResult<()> {
        let encoded = encode_snapshot(scans)?;
        let backup = self.config.keep_backup.then(|| self.config.backup_path());
        let attempts = self.config.write_attempts.max(1);

        let mut attempt = 1;
        loop {
            match write_snapshot(self.config.data_file(), &encoded, backup.as_deref()) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < attempts => {
                    warn!(attempt, error = %e, "snapshot write failed, retrying");
                    thread::sleep(self.config.write_backoff * attempt);
                    attempt += 1;
                }
                Err(e) => {
                    error!(attempts = attempt, error = %e, "snapshot write failed, scan rejected");
                    return Err(StorageError::WriteFailed {
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
            }
        }
    }
}

/// Millisecond clock id, bumped past the last id when the clock has not advanced
///
/// `None` once no id above `last_id` remains.
fn next_id(last_id: u64, timestamp_millis: i64) -> Option<u64> {
    let clock = u64::try_from(timestamp_millis).unwrap_or(0);
    last_id.checked_add(1).map(|bumped| clock.max(bumped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScanDraft, Station};
    use crate::validation::validate;
    use chrono::{TimeZone, Utc};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (EventStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = EventStoreConfig::new(temp_dir.path().join("data.json"))
            .with_retry(2, Duration::from_millis(1));
        let store = EventStore::open(config).unwrap();
        (store, temp_dir)
    }

    fn scan(packaging_id: &str) -> ValidScan {
        validate(ScanDraft::new("WH", packaging_id).with_username("WH1")).unwrap()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.is_empty());
        assert!(store.load_all().is_empty());
        assert!(!store.config().data_file().exists());
    }

    #[test]
    fn test_append_assigns_id_timestamp_and_status() {
        let (store, _temp_dir) = create_test_store();

        let before = now_millis();
        let event = store.append(scan("PKG1")).unwrap();

        assert!(event.timestamp >= before);
        assert_eq!(event.id as i64, event.timestamp.timestamp_millis());
        assert_eq!(event.station, Station::Warehouse);
        assert_eq!(event.status, ScanStatus::Complete);
        assert_eq!(store.load_all(), vec![event]);
    }

    #[test]
    fn test_rapid_appends_get_unique_increasing_ids() {
        let (store, _temp_dir) = create_test_store();
        let fixed = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();

        let ids: Vec<u64> = (0..5)
            .map(|_| store.append(scan("PKG1").at(fixed)).unwrap().id)
            .collect();

        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_preset_id_is_kept_unless_taken() {
        let (store, _temp_dir) = create_test_store();

        let mut first = scan("PKG1");
        first.id = Some(42);
        assert_eq!(store.append(first).unwrap().id, 42);

        let mut dup = scan("PKG1");
        dup.id = Some(42);
        assert_ne!(store.append(dup).unwrap().id, 42);
    }

    #[test]
    fn test_reopen_round_trips_sequence() {
        let (store, _temp_dir) = create_test_store();
        let config = store.config().clone();

        let t = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
        store.append(scan("PKG2").at(t)).unwrap();
        store.append(scan("PKG1")).unwrap();
        store.append(scan("PKG3").at(t)).unwrap();
        let expected = store.load_all();
        drop(store);

        let reopened = EventStore::open(config).unwrap();
        assert_eq!(reopened.load_all(), expected);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let (store, _temp_dir) = create_test_store();
        store.append(scan("PKG1")).unwrap();

        // A directory where the temp file should go makes every write fail
        fs::create_dir(store.config().temp_path()).unwrap();

        let err = store.append(scan("PKG2")).unwrap_err();
        assert!(matches!(err, StorageError::WriteFailed { attempts: 2, .. }));

        let scans = store.load_all();
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].packaging_id, "PKG1");

        let on_disk = read_snapshot(store.config().data_file()).unwrap().unwrap();
        assert_eq!(on_disk, scans);
    }

    #[test]
    fn test_corrupted_snapshot_fails_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "not json").unwrap();

        let result = EventStore::open(EventStoreConfig::new(&path));
        assert!(matches!(result, Err(StorageError::Corrupted { .. })));
    }

    #[test]
    fn test_open_removes_stale_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = EventStoreConfig::new(temp_dir.path().join("data.json"));
        fs::write(config.temp_path(), "{ \"scans\": [").unwrap();

        let store = EventStore::open(config.clone()).unwrap();
        assert!(store.is_empty());
        assert!(!config.temp_path().exists());
    }

    #[test]
    fn test_backup_holds_previous_snapshot() {
        let (store, _temp_dir) = create_test_store();
        store.append(scan("PKG1")).unwrap();
        store.append(scan("PKG2")).unwrap();

        let backup = read_snapshot(&store.config().backup_path()).unwrap().unwrap();
        assert_eq!(backup.len(), 1);
        assert_eq!(backup[0].packaging_id, "PKG1");
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(0, 1_000), Some(1_000));
        assert_eq!(next_id(1_000, 1_000), Some(1_001));
        assert_eq!(next_id(5_000, 1_000), Some(5_001));
        assert_eq!(next_id(0, -1), Some(1));
        assert_eq!(next_id(u64::MAX - 1, 1_000), Some(u64::MAX));
        assert_eq!(next_id(u64::MAX, 1_000), None);
    }

    #[test]
    fn test_append_after_max_id_is_rejected() {
        let (store, _temp_dir) = create_test_store();

        let mut last = scan("PKG1");
        last.id = Some(u64::MAX);
        store.append(last).unwrap();
        let config = store.config().clone();
        drop(store);

        let reopened = EventStore::open(config).unwrap();
        let err = reopened.append(scan("PKG2")).unwrap_err();
        assert!(matches!(
            err,
            StorageError::IdSpaceExhausted { last_id: u64::MAX }
        ));

        let scans = reopened.load_all();
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].id, u64::MAX);
        assert_eq!(read_snapshot(reopened.config().data_file()).unwrap().unwrap(), scans);
    }

    #[test]
    fn test_open_unreadable_path_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::create_dir(&path).unwrap();

        let result = EventStore::open(EventStoreConfig::new(&path));
        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert!(path.is_dir());
    }
}
