//! `cairn run`: execute a scenario and report each step as a JSON line.

use crate::{open_registry, save_registry, Scenario, StepOutcome};
use anyhow::{Context, Result};
use cairn_registry::RegistryConfig;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Run `scenario` against the registry stored at `state`, writing the report
/// to `out`. The snapshot is saved back even when some steps were rejected.
pub fn handle_run(
    config: &RegistryConfig,
    scenario: &Path,
    state: Option<&Path>,
    out: &mut impl Write,
) -> Result<Vec<StepOutcome>> {
    let scenario = Scenario::load(scenario)?;
    let registry = open_registry(config, state)?;

    let outcomes = scenario.run(&registry);
    for outcome in &outcomes {
        let line = serde_json::to_string(outcome).context("encoding step outcome")?;
        writeln!(out, "{line}").context("writing step outcome")?;
    }

    let rejected = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(steps = outcomes.len(), rejected, "scenario finished");

    if let Some(path) = state {
        save_registry(&registry, path)?;
    }
    Ok(outcomes)
}
