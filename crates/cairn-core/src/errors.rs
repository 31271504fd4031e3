//! Unified error system for registry operations
//!
//! Every registry operation either succeeds or yields exactly one of the
//! variants below. None of them are transient, so nothing here is retried.

use crate::identifiers::ContentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-text metadata field named by an [`RegistryError::InvalidInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    /// Record title
    Title,
    /// Record summary
    Summary,
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataField::Title => write!(f, "title"),
            MetadataField::Summary => write!(f, "summary"),
        }
    }
}

/// Unified error type for all registry operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RegistryError {
    /// Referenced content identifier has no record
    #[error("content {content_id} not found")]
    ContentNotFound {
        /// The identifier that was looked up
        content_id: ContentId,
    },

    /// Title or summary violates its length constraint
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Offending field
        field: MetadataField,
        /// What was wrong with it
        reason: String,
    },

    /// Declared size outside the permitted bound, or no identifier left to
    /// assign
    #[error("size {size} outside permitted range")]
    SizeLimitExceeded {
        /// Size that was submitted, or the entry count of a full registry
        size: u64,
    },

    /// Label collection fails its count or per-label constraints
    #[error("invalid labels: {reason}")]
    InvalidMetadata {
        /// What was wrong with the labels
        reason: String,
    },

    /// Caller is not the current owner on an owner-only mutation
    #[error("caller does not own content {content_id}")]
    OwnershipMismatch {
        /// Record the caller tried to mutate
        content_id: ContentId,
    },

    /// Caller holds neither a grant nor ownership on a gated read
    #[error("access to content {content_id} forbidden")]
    AccessForbidden {
        /// Record the caller tried to read
        content_id: ContentId,
    },
}

impl RegistryError {
    /// Create a content not found error
    pub fn not_found(content_id: ContentId) -> Self {
        Self::ContentNotFound { content_id }
    }

    /// Create an invalid input error for a free-text field
    pub fn invalid_input(field: MetadataField, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Create a size limit error
    pub fn size_limit(size: u64) -> Self {
        Self::SizeLimitExceeded { size }
    }

    /// Create the error for a registry that has assigned every identifier
    pub fn registry_full(total_entries: u64) -> Self {
        Self::SizeLimitExceeded {
            size: total_entries,
        }
    }

    /// Create an invalid label metadata error
    pub fn invalid_metadata(reason: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            reason: reason.into(),
        }
    }

    /// Create an ownership mismatch error
    pub fn ownership_mismatch(content_id: ContentId) -> Self {
        Self::OwnershipMismatch { content_id }
    }

    /// Create an access forbidden error
    pub fn access_forbidden(content_id: ContentId) -> Self {
        Self::AccessForbidden { content_id }
    }

    /// Kind of this error, stripped of context
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContentNotFound { .. } => ErrorKind::ContentNotFound,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::SizeLimitExceeded { .. } => ErrorKind::SizeLimitExceeded,
            Self::InvalidMetadata { .. } => ErrorKind::InvalidMetadata,
            Self::OwnershipMismatch { .. } => ErrorKind::OwnershipMismatch,
            Self::AccessForbidden { .. } => ErrorKind::AccessForbidden,
        }
    }

    /// Stable numeric code for hosts that carry errors as integers
    pub fn code(&self) -> u32 {
        self.kind().code()
    }
}

/// Error kinds surfaced verbatim to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// See [`RegistryError::ContentNotFound`]
    ContentNotFound,
    /// See [`RegistryError::InvalidInput`]
    InvalidInput,
    /// See [`RegistryError::SizeLimitExceeded`]
    SizeLimitExceeded,
    /// See [`RegistryError::InvalidMetadata`]
    InvalidMetadata,
    /// See [`RegistryError::OwnershipMismatch`]
    OwnershipMismatch,
    /// See [`RegistryError::AccessForbidden`]
    AccessForbidden,
}

impl ErrorKind {
    /// Stable numeric code
    pub const fn code(self) -> u32 {
        match self {
            ErrorKind::ContentNotFound => 100,
            ErrorKind::InvalidInput => 101,
            ErrorKind::SizeLimitExceeded => 102,
            ErrorKind::InvalidMetadata => 103,
            ErrorKind::OwnershipMismatch => 104,
            ErrorKind::AccessForbidden => 105,
        }
    }

    /// Kind name as callers see it
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ContentNotFound => "ContentNotFound",
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::SizeLimitExceeded => "SizeLimitExceeded",
            ErrorKind::InvalidMetadata => "InvalidMetadata",
            ErrorKind::OwnershipMismatch => "OwnershipMismatch",
            ErrorKind::AccessForbidden => "AccessForbidden",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
