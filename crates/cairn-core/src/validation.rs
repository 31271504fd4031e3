//! Metadata validation helpers
//!
//! Checks run in a fixed order (title, size, summary, labels) and stop at the
//! first failure, so a request with several bad fields always reports the
//! same error.

use crate::errors::{MetadataField, RegistryError, Result};
use crate::limits::{MAX_LABELS, MAX_LABEL_LEN, MAX_SUMMARY_LEN, MAX_TITLE_LEN, SIZE_LIMIT};
use crate::record::ContentMetadata;

/// Validate a full metadata bundle.
pub fn validate_metadata(metadata: &ContentMetadata) -> Result<()> {
    validate_title(&metadata.title)?;
    validate_size(metadata.size)?;
    validate_summary(&metadata.summary)?;
    validate_labels(&metadata.labels)
}

/// Title must be non-empty and at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<()> {
    validate_text(MetadataField::Title, title, MAX_TITLE_LEN)
}

/// Size must lie strictly between 0 and [`SIZE_LIMIT`].
pub fn validate_size(size: u64) -> Result<()> {
    if size == 0 || size >= SIZE_LIMIT {
        return Err(RegistryError::size_limit(size));
    }
    Ok(())
}

/// Summary must be non-empty and at most [`MAX_SUMMARY_LEN`] characters.
pub fn validate_summary(summary: &str) -> Result<()> {
    validate_text(MetadataField::Summary, summary, MAX_SUMMARY_LEN)
}

/// Between 1 and [`MAX_LABELS`] labels, each non-empty and at most
/// [`MAX_LABEL_LEN`] characters.
pub fn validate_labels(labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        return Err(RegistryError::invalid_metadata("at least one label required"));
    }
    if labels.len() > MAX_LABELS {
        return Err(RegistryError::invalid_metadata(format!(
            "{} labels exceeds maximum of {MAX_LABELS}",
            labels.len()
        )));
    }
    for (index, label) in labels.iter().enumerate() {
        if label.is_empty() {
            return Err(RegistryError::invalid_metadata(format!(
                "label {index} is empty"
            )));
        }
        let len = label.chars().count();
        if len > MAX_LABEL_LEN {
            return Err(RegistryError::invalid_metadata(format!(
                "label {index} has {len} characters, maximum is {MAX_LABEL_LEN}"
            )));
        }
    }
    Ok(())
}

fn validate_text(field: MetadataField, value: &str, max: usize) -> Result<()> {
    if value.is_empty() {
        return Err(RegistryError::invalid_input(field, "must not be empty"));
    }
    let len = value.chars().count();
    if len > max {
        return Err(RegistryError::invalid_input(
            field,
            format!("{len} characters exceeds maximum of {max}"),
        ));
    }
    Ok(())
}
