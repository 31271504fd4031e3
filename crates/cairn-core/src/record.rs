//! Content record data model and read projections
//!
//! A [`ContentRecord`] holds metadata pointers only (title, size, summary,
//! labels). Content bytes never pass through the registry.

use crate::identifiers::{BlockHeight, ContentId, PrincipalId};
use serde::{Deserialize, Serialize};

/// Caller-supplied metadata, validated as a unit on create and update
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentMetadata {
    /// Human-readable title
    pub title: String,
    /// Declared content size
    pub size: u64,
    /// Short description
    pub summary: String,
    /// Ordered labels
    pub labels: Vec<String>,
}

impl ContentMetadata {
    /// Create a metadata bundle
    pub fn new(
        title: impl Into<String>,
        size: u64,
        summary: impl Into<String>,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            size,
            summary: summary.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

/// A registered content record
///
/// `id` and `registered_at` are fixed at creation. `owner` changes only by
/// transfer, `metadata` only by a full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Sequential identifier
    pub id: ContentId,
    /// Sole owner
    pub owner: PrincipalId,
    /// Height at which the record was registered
    pub registered_at: BlockHeight,
    /// Current metadata
    #[serde(flatten)]
    pub metadata: ContentMetadata,
}

impl ContentRecord {
    /// Create a record for freshly registered content
    pub fn new(
        id: ContentId,
        owner: PrincipalId,
        registered_at: BlockHeight,
        metadata: ContentMetadata,
    ) -> Self {
        Self {
            id,
            owner,
            registered_at,
            metadata,
        }
    }

    /// Check whether `principal` is the current owner
    pub fn is_owned_by(&self, principal: &PrincipalId) -> bool {
        &self.owner == principal
    }
}

/// Result of inspecting one principal's access to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessAnalysis {
    /// An explicit grant row exists and is set
    pub has_grant: bool,
    /// The principal is the current owner
    pub is_owner: bool,
    /// `has_grant || is_owner`
    pub access_permitted: bool,
}

impl AccessAnalysis {
    /// Build an analysis from its two inputs
    pub fn new(has_grant: bool, is_owner: bool) -> Self {
        Self {
            has_grant,
            is_owner,
            access_permitted: has_grant || is_owner,
        }
    }

    /// Analysis for a principal with no relationship to the record
    pub fn denied() -> Self {
        Self::new(false, false)
    }
}

/// System-wide counters exposed by the metrics read path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryMetrics {
    /// Highest identifier ever assigned (deleted records still count)
    pub total_entries: u64,
    /// Root authority captured when the registry was initialized
    pub root_authority: PrincipalId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_analysis_combines_grant_and_ownership() {
        assert_eq!(AccessAnalysis::denied(), AccessAnalysis::new(false, false));
        assert!(!AccessAnalysis::denied().access_permitted);
        assert!(AccessAnalysis::new(true, false).access_permitted);
        assert!(AccessAnalysis::new(false, true).access_permitted);
        assert!(AccessAnalysis::new(true, true).access_permitted);
    }

    #[test]
    fn test_record_projection_is_flat() {
        let record = ContentRecord::new(
            ContentId::new(1),
            PrincipalId::new("alice"),
            BlockHeight::new(10),
            ContentMetadata::new("Doc A", 100, "s", ["x"]),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Doc A");
        assert_eq!(json["labels"][0], "x");
        assert_eq!(json["registered_at"], 10);

        let back: ContentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
        assert!(back.is_owned_by(&PrincipalId::new("alice")));
    }
}
