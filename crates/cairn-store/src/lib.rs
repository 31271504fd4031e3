//! Cairn Store - Passive Registry Storage
//!
//! **Purpose**: Hold the three resources the registry persists and nothing
//! else:
//!
//! - the record map (`ContentId -> ContentRecord`)
//! - the permission matrix (`(ContentId, PrincipalId) -> bool`)
//! - the sequence counter
//!
//! # Architecture Constraints
//!
//! - YES Storage traits and in-memory implementations
//! - YES Snapshot layout for handing state to a host
//! - NO validation, ownership or access checks (that's `cairn-registry`)
//! - NO locking; callers serialize access
//!
//! Stores are only ever written by the registry service, which holds them
//! behind a single lock.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Snapshot I/O errors
pub mod error;

/// In-memory store implementations
pub mod memory;

/// Content identifier sequence
pub mod sequence;

/// Serializable snapshot of all registry state
pub mod snapshot;

/// Storage traits
pub mod traits;

pub use error::SnapshotError;
pub use memory::{MemoryGrantStore, MemoryRecordStore};
pub use sequence::SequenceCounter;
pub use snapshot::{GrantEntry, RegistrySnapshot};
pub use traits::{GrantStore, RecordStore};
