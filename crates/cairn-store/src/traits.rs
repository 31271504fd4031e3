//! Storage traits for the record map and the permission matrix.

use cairn_core::{ContentId, ContentRecord, PrincipalId};

/// Mapping from content identifier to content record
pub trait RecordStore: Send + Sync {
    /// Look up a record
    fn get(&self, id: ContentId) -> Option<&ContentRecord>;

    /// Look up a record for in-place mutation
    fn get_mut(&mut self, id: ContentId) -> Option<&mut ContentRecord>;

    /// Insert a record, returning any record previously stored under its id
    fn insert(&mut self, record: ContentRecord) -> Option<ContentRecord>;

    /// Remove a record
    fn remove(&mut self, id: ContentId) -> Option<ContentRecord>;

    /// Check whether a record exists
    fn contains(&self, id: ContentId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live records
    fn len(&self) -> usize;

    /// Whether the store holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All live records in identifier order
    fn records(&self) -> Vec<ContentRecord>;
}

/// Mapping from `(content, principal)` to an explicit permission flag
///
/// A missing entry and an entry holding `false` are distinct states; both
/// read as "no grant" through [`GrantStore::has_grant`].
pub trait GrantStore: Send + Sync {
    /// Raw entry for a key, `None` when no entry exists
    fn entry(&self, content_id: ContentId, principal: &PrincipalId) -> Option<bool>;

    /// Write an entry
    fn insert(&mut self, content_id: ContentId, principal: PrincipalId, granted: bool);

    /// Record an explicit grant
    fn grant(&mut self, content_id: ContentId, principal: PrincipalId) {
        self.insert(content_id, principal, true);
    }

    /// Explicit grant flag, defaulting to `false` when absent
    fn has_grant(&self, content_id: ContentId, principal: &PrincipalId) -> bool {
        self.entry(content_id, principal).unwrap_or(false)
    }

    /// Number of entries, including orphans of deleted records
    fn len(&self) -> usize;

    /// Whether the matrix holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries in key order
    fn entries(&self) -> Vec<(ContentId, PrincipalId, bool)>;
}
