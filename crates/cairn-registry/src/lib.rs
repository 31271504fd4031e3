//! Cairn Registry - Ownership and Permission Service
//!
//! This crate provides the only component of the registry with logic. It
//! owns the record store, the permission matrix and the sequence counter,
//! and is the sole entry point for reading or changing them.
//!
//! - Lifecycle: `create_record`, `transfer_ownership`, `update_metadata`,
//!   `delete_record`
//! - Reads: `analyze_access`, `lookup_owner`, `fetch_details`, `fetch_metrics`
//! - Host support: the fact journal, snapshots, and `RegistryConfig`
//!
//! # Execution model
//!
//! Every operation runs under one `RwLock` over all three resources.
//! Mutations hold the write lock from the first state check to the last
//! write, so a rejected call leaves state untouched and no partial write is
//! ever visible to another call.
//!
//! # Example
//!
//! ```ignore
//! use cairn_core::{CallContext, ContentMetadata};
//! use cairn_registry::{Registry, RegistryConfig};
//!
//! let registry = Registry::new(&RegistryConfig::with_root_authority("root"));
//! let alice = CallContext::new("alice", 10);
//!
//! let id = registry.create_record(&alice, ContentMetadata::new("Doc A", 100, "s", ["x"]))?;
//! let record = registry.fetch_details(&alice, id)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod facts;
pub mod service;

pub use config::{ConfigError, LoggingSection, RegistryConfig, RegistrySection, StorageSection};
pub use facts::{FactJournal, RegistryFact};
pub use service::Registry;

pub use cairn_core::{
    AccessAnalysis, BlockHeight, CallContext, ContentId, ContentMetadata, ContentRecord,
    ErrorKind, PrincipalId, RegistryError, RegistryMetrics,
};
pub use cairn_store::{RegistrySnapshot, SnapshotError};
