//! In-memory stores backed by ordered maps.

use crate::traits::{GrantStore, RecordStore};
use cairn_core::{ContentId, ContentRecord, PrincipalId};
use std::collections::BTreeMap;

/// In-memory record map
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: BTreeMap<ContentId, ContentRecord>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, id: ContentId) -> Option<&ContentRecord> {
        self.records.get(&id)
    }

    fn get_mut(&mut self, id: ContentId) -> Option<&mut ContentRecord> {
        self.records.get_mut(&id)
    }

    fn insert(&mut self, record: ContentRecord) -> Option<ContentRecord> {
        self.records.insert(record.id, record)
    }

    fn remove(&mut self, id: ContentId) -> Option<ContentRecord> {
        self.records.remove(&id)
    }

    fn contains(&self, id: ContentId) -> bool {
        self.records.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn records(&self) -> Vec<ContentRecord> {
        self.records.values().cloned().collect()
    }
}

/// In-memory permission matrix keyed by `(content, principal)`
#[derive(Debug, Clone, Default)]
pub struct MemoryGrantStore {
    entries: BTreeMap<(ContentId, PrincipalId), bool>,
}

impl MemoryGrantStore {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self::default()
    }
}

impl GrantStore for MemoryGrantStore {
    fn entry(&self, content_id: ContentId, principal: &PrincipalId) -> Option<bool> {
        // BTreeMap lookups need an owned key for tuple keys
        self.entries
            .get(&(content_id, principal.clone()))
            .copied()
    }

    fn insert(&mut self, content_id: ContentId, principal: PrincipalId, granted: bool) {
        self.entries.insert((content_id, principal), granted);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> Vec<(ContentId, PrincipalId, bool)> {
        self.entries
            .iter()
            .map(|((id, principal), granted)| (*id, principal.clone(), *granted))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_core::{BlockHeight, ContentMetadata};

    fn record(id: u64, owner: &str) -> ContentRecord {
        ContentRecord::new(
            ContentId::new(id),
            PrincipalId::new(owner),
            BlockHeight::new(1),
            ContentMetadata::new("t", 1, "s", ["l"]),
        )
    }

    #[test]
    fn test_record_store_insert_get_remove() {
        let mut store = MemoryRecordStore::new();
        assert!(store.is_empty());

        assert!(store.insert(record(2, "bob")).is_none());
        assert!(store.insert(record(1, "alice")).is_none());
        assert_eq!(store.len(), 2);
        assert!(store.contains(ContentId::new(1)));

        let ids: Vec<u64> = store.records().iter().map(|r| r.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);

        store.get_mut(ContentId::new(1)).unwrap().owner = PrincipalId::new("carol");
        assert_eq!(store.get(ContentId::new(1)).unwrap().owner.as_str(), "carol");

        assert!(store.remove(ContentId::new(1)).is_some());
        assert!(store.remove(ContentId::new(1)).is_none());
        assert!(!store.contains(ContentId::new(1)));
    }

    #[test]
    fn test_grant_absent_differs_from_false() {
        let mut grants = MemoryGrantStore::new();
        let id = ContentId::new(1);
        let alice = PrincipalId::new("alice");
        let bob = PrincipalId::new("bob");

        assert_eq!(grants.entry(id, &alice), None);
        assert!(!grants.has_grant(id, &alice));

        grants.insert(id, bob.clone(), false);
        assert_eq!(grants.entry(id, &bob), Some(false));
        assert!(!grants.has_grant(id, &bob));

        grants.grant(id, alice.clone());
        assert_eq!(grants.entry(id, &alice), Some(true));
        assert!(grants.has_grant(id, &alice));
        assert!(!grants.has_grant(ContentId::new(2), &alice));
        assert_eq!(grants.len(), 2);
    }
}
