//! Static limits on registered metadata.
//!
//! String lengths count Unicode scalar values.

/// Maximum title length
pub const MAX_TITLE_LEN: usize = 64;

/// Maximum summary length
pub const MAX_SUMMARY_LEN: usize = 128;

/// Maximum number of labels on a record
pub const MAX_LABELS: usize = 10;

/// Maximum length of a single label
pub const MAX_LABEL_LEN: usize = 32;

/// Exclusive upper bound on the declared content size
pub const SIZE_LIMIT: u64 = 1_000_000_000;
