//! Snapshot errors
//!
//! Kept apart from `RegistryError`: a bad snapshot is an operator problem,
//! never an outcome of a registry operation.

use cairn_core::{ContentId, RegistryError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading, saving or restoring a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed.
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON for the snapshot layout.
    #[error("snapshot is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A record carries an identifier the counter has not reached.
    #[error("record {content_id} is ahead of sequence counter {counter}")]
    CounterBehindRecords {
        /// Offending record
        content_id: ContentId,
        /// Counter stored in the snapshot
        counter: u64,
    },

    /// A record breaks the metadata limits every stored record must meet.
    #[error("record {content_id} is invalid: {source}")]
    InvalidRecord {
        /// Offending record
        content_id: ContentId,
        /// Limit the metadata fails
        #[source]
        source: RegistryError,
    },

    /// Two records share an identifier.
    #[error("duplicate record {0}")]
    DuplicateRecord(ContentId),
}

impl SnapshotError {
    /// Create an I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
