//! Per-call context supplied by the host.

use crate::identifiers::{BlockHeight, PrincipalId};
use serde::{Deserialize, Serialize};

/// Trusted facts about the call currently executing
///
/// The host resolves who is calling and at what height; the registry never
/// second-guesses either value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Resolved identity of the caller
    pub caller: PrincipalId,
    /// Current host height, read only when registering new content
    pub height: BlockHeight,
}

impl CallContext {
    /// Create a new call context
    pub fn new(caller: impl Into<PrincipalId>, height: impl Into<BlockHeight>) -> Self {
        Self {
            caller: caller.into(),
            height: height.into(),
        }
    }

    /// Same caller at a different height
    pub fn at_height(&self, height: impl Into<BlockHeight>) -> Self {
        Self {
            caller: self.caller.clone(),
            height: height.into(),
        }
    }
}
