//! Run command implementation

use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the data directory from the config file
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let poller = super::build_poller(config, self.data_dir.clone())?;
        poller.run().await;
        Ok(())
    }
}
