//! CLI interface for spotlog
//!
//! Provides subcommands for:
//! - `run`: poll all configured sources forever
//! - `once`: run a single polling round and exit
//! - `config`: show the resolved configuration

mod once;
mod run;

pub use once::OnceArgs;
pub use run::RunArgs;

use crate::config::{Config, Credentials};
use crate::poller::Poller;
use crate::recorder::CsvRecorder;
use crate::source::build_sources;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "spotlog")]
#[command(about = "Spot-price poller that records exchange quotes to per-pair CSV logs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll all configured sources forever
    Run(RunArgs),
    /// Run a single polling round and exit
    Once(OnceArgs),
    /// Show the resolved configuration
    Config,
}

/// Assemble a poller from config: shared HTTP client, env credentials,
/// one source per `[[sources]]` entry. Construction failures (unknown
/// exchange, bad client build) are startup failures and propagate.
pub(crate) fn build_poller(
    config: &Config,
    data_dir_override: Option<PathBuf>,
) -> anyhow::Result<Poller> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.poller.request_timeout_secs))
        .build()?;

    let credentials = Credentials::from_env();
    let sources = build_sources(&client, &config.sources, &credentials)?;

    let data_dir = data_dir_override.unwrap_or_else(|| config.recorder.data_dir.clone());
    let recorder = CsvRecorder::new(data_dir);

    Ok(Poller::new(
        sources,
        recorder,
        Duration::from_secs(config.poller.interval_secs),
    ))
}
