//! Core identifier types used across the registry
//!
//! Content identifiers are sequential integers handed out by the registry,
//! principals are opaque identities resolved by the host, and heights are the
//! host's monotonic clock.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a registered content record
///
/// Assigned sequentially starting at 1. Identifiers are never reused, even
/// after the record they named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(u64);

impl ContentId {
    /// Create a content identifier from its raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw identifier value
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "content-{}", self.0)
    }
}

impl From<u64> for ContentId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<ContentId> for u64 {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

/// Identity of a principal (record owner, caller, grantee)
///
/// The registry treats principals as opaque strings supplied by the host; it
/// never derives or verifies them.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Create a new principal identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PrincipalId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for PrincipalId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl FromStr for PrincipalId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Host height at which an operation executes
///
/// Heights are supplied by the host and are expected to be non-decreasing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Create a height from its raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw height
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_id_display_and_ordering() {
        let a = ContentId::new(1);
        let b = ContentId::from(2);
        assert!(a < b);
        assert_eq!(a.to_string(), "content-1");
        assert_eq!(u64::from(b), 2);
    }

    #[test]
    fn test_principal_serializes_transparently() {
        let principal = PrincipalId::new("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7");
        let json = serde_json::to_string(&principal).unwrap();
        assert_eq!(json, "\"SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7\"");

        let back: PrincipalId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, principal);
    }

    #[test]
    fn test_principal_default_is_empty() {
        assert_eq!(PrincipalId::default().as_str(), "");
        assert_eq!(PrincipalId::default(), PrincipalId::new(""));
    }

    #[test]
    fn test_height_default_is_zero() {
        assert_eq!(BlockHeight::default().value(), 0);
        assert_eq!(BlockHeight::new(42).to_string(), "#42");
    }
}
