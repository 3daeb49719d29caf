use anyhow::Context;
use clap::Parser;
use spotlog::cli::{Cli, Commands};
use spotlog::config::Config;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env credentials if present, ignore errors
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // A missing config file degrades to defaults; a present-but-broken one
    // is a startup failure and must not be papered over
    let config = if Path::new(&cli.config).exists() {
        Config::load(&cli.config)
            .with_context(|| format!("invalid config file {}", cli.config))?
    } else {
        eprintln!(
            "Warning: config file {} not found, using defaults",
            cli.config
        );
        Config::default()
    };

    // Initialize telemetry
    let _guard = spotlog::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting polling loop");
            args.execute(&config).await?;
        }
        Commands::Once(args) => {
            tracing::info!("Running a single polling round");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Poll interval: {}s", config.poller.interval_secs);
            println!("  Data dir: {}", config.recorder.data_dir.display());
            for source in &config.sources {
                println!("  Source: {} {}", source.exchange, source.symbol);
            }
            match config.telemetry.metrics_port {
                Some(port) => println!("  Metrics port: {}", port),
                None => println!("  Metrics: disabled"),
            }
        }
    }

    Ok(())
}
