//! Registry facts
//!
//! Each committed mutation appends one [`RegistryFact`] to the journal while
//! the write lock is still held, so journal order is commit order. Rejected
//! calls append nothing. Facts are for the host to relay; no authorization
//! decision reads them.

use cairn_core::{BlockHeight, ContentId, PrincipalId};
use serde::{Deserialize, Serialize};

/// A committed registry mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryFact {
    /// New content registered
    Registered {
        /// Assigned identifier
        content_id: ContentId,
        /// Initial owner (the caller)
        owner: PrincipalId,
        /// Height of the call
        height: BlockHeight,
    },
    /// Ownership moved to another principal
    OwnershipTransferred {
        /// Affected record
        content_id: ContentId,
        /// Previous owner
        from: PrincipalId,
        /// New owner
        to: PrincipalId,
        /// Height of the call
        height: BlockHeight,
    },
    /// Metadata replaced
    MetadataUpdated {
        /// Affected record
        content_id: ContentId,
        /// Height of the call
        height: BlockHeight,
    },
    /// Record deleted
    Removed {
        /// Deleted record
        content_id: ContentId,
        /// Height of the call
        height: BlockHeight,
    },
}

impl RegistryFact {
    /// Record the fact is about
    pub fn content_id(&self) -> ContentId {
        match self {
            RegistryFact::Registered { content_id, .. }
            | RegistryFact::OwnershipTransferred { content_id, .. }
            | RegistryFact::MetadataUpdated { content_id, .. }
            | RegistryFact::Removed { content_id, .. } => *content_id,
        }
    }

    /// Height at which the mutation committed
    pub fn height(&self) -> BlockHeight {
        match self {
            RegistryFact::Registered { height, .. }
            | RegistryFact::OwnershipTransferred { height, .. }
            | RegistryFact::MetadataUpdated { height, .. }
            | RegistryFact::Removed { height, .. } => *height,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            RegistryFact::Registered { .. } => "registered",
            RegistryFact::OwnershipTransferred { .. } => "ownership_transferred",
            RegistryFact::MetadataUpdated { .. } => "metadata_updated",
            RegistryFact::Removed { .. } => "removed",
        }
    }
}

/// Append-only list of committed facts
#[derive(Debug, Clone, Default)]
pub struct FactJournal {
    facts: Vec<RegistryFact>,
}

impl FactJournal {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fact, returning its offset
    pub fn append(&mut self, fact: RegistryFact) -> u64 {
        self.facts.push(fact);
        (self.facts.len() - 1) as u64
    }

    /// Facts at offsets `>= offset`
    pub fn since(&self, offset: u64) -> &[RegistryFact] {
        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        self.facts.get(start..).unwrap_or(&[])
    }

    /// Number of facts recorded
    pub fn len(&self) -> u64 {
        self.facts.len() as u64
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
