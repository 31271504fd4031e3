//! Cairn Core - Registry Data Model Foundation
//!
//! This crate provides the foundational types for the cairn content registry:
//! identifiers, the content record data model, the metadata limits enforced on
//! every create and update, and the unified error type returned by every
//! registry operation.
//!
//! # Architecture Constraints
//!
//! - YES Identifier newtypes and data model
//! - YES Pure validation of metadata against static limits
//! - YES Unified error kinds for all registry operations
//! - NO storage (that's `cairn-store`)
//! - NO authorization or lifecycle logic (that's `cairn-registry`)
//!
//! Everything here is synchronous and free of I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Caller identity and height supplied by the host for each call
pub mod context;

/// Unified error handling
pub mod errors;

/// Content, principal and height identifiers
pub mod identifiers;

/// Static metadata limits
pub mod limits;

/// Content record data model and read projections
pub mod record;

/// Metadata validation helpers
pub mod validation;

// === Public API Re-exports ===

pub use context::CallContext;
pub use errors::{ErrorKind, RegistryError, Result};
pub use identifiers::{BlockHeight, ContentId, PrincipalId};
pub use record::{AccessAnalysis, ContentMetadata, ContentRecord, RegistryMetrics};
pub use validation::validate_metadata;
