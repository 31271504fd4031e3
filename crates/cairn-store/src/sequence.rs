//! Content identifier sequence.

use cairn_core::ContentId;
use serde::{Deserialize, Serialize};

/// Highest content identifier assigned so far
///
/// Starts at zero, advances by exactly one per allocation, never goes back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceCounter(u64);

impl SequenceCounter {
    /// Fresh counter with nothing allocated
    pub const fn new() -> Self {
        Self(0)
    }

    /// Resume from a previously persisted value
    pub const fn resume(value: u64) -> Self {
        Self(value)
    }

    /// Highest identifier assigned so far
    pub const fn current(self) -> u64 {
        self.0
    }

    /// Whether every identifier has been handed out
    pub const fn is_exhausted(self) -> bool {
        self.0 == u64::MAX
    }

    /// Allocate the next identifier, or `None` once the space is used up.
    ///
    /// An exhausted counter stays where it is.
    pub fn allocate(&mut self) -> Option<ContentId> {
        let next = self.0.checked_add(1)?;
        self.0 = next;
        Some(ContentId::new(next))
    }
}
