//! `cairn metrics`

use crate::open_registry;
use anyhow::{Context, Result};
use cairn_registry::RegistryConfig;
use std::io::Write;
use std::path::Path;

/// Print the metrics read path for the registry at `state` as JSON
pub fn handle_metrics(
    config: &RegistryConfig,
    state: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let registry = open_registry(config, state)?;
    let metrics = serde_json::to_string_pretty(&registry.fetch_metrics())
        .context("encoding metrics")?;
    writeln!(out, "{metrics}").context("writing metrics")?;
    Ok(())
}
