//! Log output for the crm binary
//!
//! stdout carries the JSON a command produces and nothing else, so every log
//! line is written to stderr. Quiet by default (`warn`); `crm --debug stats`
//! shows each statement the data layer runs, and `RUST_LOG` (for example
//! `RUST_LOG=crm_core::db=info`) replaces the level filter entirely.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// `--debug` was given
    pub debug: bool,
}

pub fn init(config: &TracingConfig) -> Result<()> {
    let default_level = if config.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
