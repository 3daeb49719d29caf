//! Once command implementation

use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct OnceArgs {
    /// Override the data directory from the config file
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}

impl OnceArgs {
    /// Execute one round. Individual source failures are not fatal;
    /// the command still exits 0 with the round summary logged.
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let poller = super::build_poller(config, self.data_dir.clone())?;
        let summary = poller.run_round().await;
        tracing::info!(
            recorded = summary.recorded,
            failed = summary.failed,
            "round complete"
        );
        Ok(())
    }
}
