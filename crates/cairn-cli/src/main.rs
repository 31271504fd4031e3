//! Cairn command-line interface
//!
//! Drives a registry from scripted scenarios, persisting state between runs
//! in a JSON snapshot.

use anyhow::Result;
use cairn_cli::handlers::{handle_metrics, handle_run, handle_show_config};
use cairn_cli::{load_config, state_path};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cairn")]
#[command(about = "Cairn - content registry with ownership and explicit grants", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "cairn.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a scenario file, one JSON report line per step
    Run {
        /// Scenario TOML file
        scenario: PathBuf,

        /// Snapshot file to load before and save after the run
        #[arg(short, long)]
        state: Option<PathBuf>,
    },

    /// Show total entries and the root authority
    Metrics {
        /// Snapshot file to read
        #[arg(short, long)]
        state: Option<PathBuf>,
    },

    /// Print the effective configuration
    ShowConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    // RUST_LOG wins, then --verbose, then the configured level
    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Config is read before the subscriber exists, so report its source here
    if cli.config.exists() {
        debug!(path = %cli.config.display(), "configuration loaded");
    } else {
        debug!(path = %cli.config.display(), "config file not found, using defaults");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Run { scenario, state } => {
            let state = state_path(&config, state);
            handle_run(&config, &scenario, state.as_deref(), &mut out)?;
        }

        Commands::Metrics { state } => {
            let state = state_path(&config, state);
            handle_metrics(&config, state.as_deref(), &mut out)?;
        }

        Commands::ShowConfig => {
            handle_show_config(&config, &mut out)?;
        }
    }

    Ok(())
}
