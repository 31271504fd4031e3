//! Serializable snapshot of all registry state
//!
//! The layout is exactly the three persisted resources: the counter, the
//! record map and the permission matrix. Grant rows for deleted records are
//! kept so a restored registry is indistinguishable from the original.

use crate::error::SnapshotError;
use crate::sequence::SequenceCounter;
use crate::traits::{GrantStore, RecordStore};
use cairn_core::{validate_metadata, ContentId, ContentRecord, PrincipalId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// One row of the permission matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantEntry {
    /// Content the grant applies to
    pub content_id: ContentId,
    /// Principal holding the grant
    pub principal: PrincipalId,
    /// Explicit permission flag
    pub granted: bool,
}

/// Point-in-time copy of registry state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Sequence counter value
    pub counter: SequenceCounter,
    /// Live records in identifier order
    pub records: Vec<ContentRecord>,
    /// Permission matrix rows in key order
    #[serde(default)]
    pub grants: Vec<GrantEntry>,
}

impl RegistrySnapshot {
    /// Copy state out of a set of stores.
    pub fn capture<R, G>(counter: SequenceCounter, records: &R, grants: &G) -> Self
    where
        R: RecordStore + ?Sized,
        G: GrantStore + ?Sized,
    {
        Self {
            counter,
            records: records.records(),
            grants: grants
                .entries()
                .into_iter()
                .map(|(content_id, principal, granted)| GrantEntry {
                    content_id,
                    principal,
                    granted,
                })
                .collect(),
        }
    }

    /// Check that the snapshot could have been produced by a registry.
    pub fn verify(&self) -> Result<(), SnapshotError> {
        let counter = self.counter.current();
        let mut seen = BTreeSet::new();
        for record in &self.records {
            if record.id.value() == 0 || record.id.value() > counter {
                return Err(SnapshotError::CounterBehindRecords {
                    content_id: record.id,
                    counter,
                });
            }
            if !seen.insert(record.id) {
                return Err(SnapshotError::DuplicateRecord(record.id));
            }
            validate_metadata(&record.metadata).map_err(|source| SnapshotError::InvalidRecord {
                content_id: record.id,
                source,
            })?;
        }
        Ok(())
    }

    /// Verify the snapshot and load it into empty stores.
    pub fn restore_into<R, G>(
        self,
        records: &mut R,
        grants: &mut G,
    ) -> Result<SequenceCounter, SnapshotError>
    where
        R: RecordStore + ?Sized,
        G: GrantStore + ?Sized,
    {
        self.verify()?;
        for record in self.records {
            records.insert(record);
        }
        for entry in self.grants {
            grants.insert(entry.content_id, entry.principal, entry.granted);
        }
        Ok(self.counter)
    }
}

/// Read a snapshot from a JSON file.
pub fn load(path: &Path) -> Result<RegistrySnapshot, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::io(path, e))?;
    let snapshot: RegistrySnapshot = serde_json::from_str(&content)?;
    snapshot.verify()?;
    debug!(
        path = %path.display(),
        counter = snapshot.counter.current(),
        records = snapshot.records.len(),
        "loaded registry snapshot"
    );
    Ok(snapshot)
}

/// Write a snapshot to a JSON file, replacing any existing file.
pub fn save(path: &Path, snapshot: &RegistrySnapshot) -> Result<(), SnapshotError> {
    let content = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, content).map_err(|e| SnapshotError::io(path, e))?;
    debug!(
        path = %path.display(),
        counter = snapshot.counter.current(),
        "saved registry snapshot"
    );
    Ok(())
}
