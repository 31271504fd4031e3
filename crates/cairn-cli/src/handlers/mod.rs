//! Command handlers for the `cairn` binary

pub mod metrics;
pub mod run;
pub mod show_config;

pub use metrics::handle_metrics;
pub use run::handle_run;
pub use show_config::handle_show_config;
