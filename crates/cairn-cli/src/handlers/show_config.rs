//! `cairn show-config`

use anyhow::{Context, Result};
use cairn_registry::RegistryConfig;
use std::io::Write;

/// Print the effective configuration after environment overrides
pub fn handle_show_config(config: &RegistryConfig, out: &mut impl Write) -> Result<()> {
    let rendered = config.to_toml_string()?;
    write!(out, "{rendered}").context("writing config")?;
    Ok(())
}
