//! Error types for scan recording and storage

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for ledger operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type for durable storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Required request fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PackagingId,
    Station,
}

impl Field {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::PackagingId => "packagingId",
            Field::Station => "station",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by record, history and summary operations
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("partNo must be 11-14 characters when provided (got {len})")]
    InvalidPartNoLength { len: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ScanError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ScanError::MissingField(_) => "MISSING_FIELD",
            ScanError::InvalidPartNoLength { .. } => "INVALID_PART_NO_LENGTH",
            ScanError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// True for errors caused by the request rather than the store
    pub fn is_validation(&self) -> bool {
        !matches!(self, ScanError::Storage(_))
    }
}

/// Failures of the durable snapshot
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot {} is corrupted: {source}", path.display())]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("no scan id left above {last_id}")]
    IdSpaceExhausted { last_id: u64 },

    #[error("durable write failed after {attempts} attempt(s): {source}")]
    WriteFailed {
        attempts: u32,
        #[source]
        source: Box<StorageError>,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
