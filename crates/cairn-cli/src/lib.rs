//! Cairn CLI Library
//!
//! Shared pieces behind the `cairn` binary:
//! - Config loading with environment overrides
//! - Opening a registry from an optional snapshot file
//! - Scripted scenarios and their step-by-step report

pub mod handlers;
pub mod scenario;

use anyhow::{Context, Result};
use cairn_registry::{Registry, RegistryConfig};
use std::path::{Path, PathBuf};
use tracing::info;

pub use scenario::{Operation, Scenario, Step, StepOutcome};

/// Load the config file if present, apply `CAIRN_*` overrides, then validate.
///
/// A missing file is not an error: the environment alone may supply every
/// required field.
pub fn load_config(path: &Path) -> Result<RegistryConfig> {
    let mut config = if path.exists() {
        RegistryConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?
    } else {
        RegistryConfig::default()
    };
    config.merge_with_env();
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Snapshot path from the command line, falling back to `storage.snapshot_path`
pub fn state_path(config: &RegistryConfig, flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| config.storage.snapshot_path.clone())
}

/// Open a registry, restoring from `state` when that file exists
pub fn open_registry(config: &RegistryConfig, state: Option<&Path>) -> Result<Registry> {
    match state {
        Some(path) if path.exists() => {
            let snapshot = cairn_store::snapshot::load(path)
                .with_context(|| format!("loading snapshot from {}", path.display()))?;
            let registry = Registry::from_snapshot(config, snapshot)
                .with_context(|| format!("restoring registry from {}", path.display()))?;
            Ok(registry)
        }
        _ => {
            info!("starting with an empty registry");
            Ok(Registry::new(config))
        }
    }
}

/// Persist the registry to `path`
pub fn save_registry(registry: &Registry, path: &Path) -> Result<()> {
    cairn_store::snapshot::save(path, &registry.snapshot())
        .with_context(|| format!("saving snapshot to {}", path.display()))?;
    info!(path = %path.display(), "snapshot saved");
    Ok(())
}
