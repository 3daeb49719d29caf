//! Configuration types for spotlog

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub recorder: RecorderConfig,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Polling loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// Seconds to sleep between rounds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Outbound request timeout on the shared HTTP client (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Recorder configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RecorderConfig {
    /// Directory holding one CSV log per (symbol, exchange) pair
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// One polled (exchange, symbol) pair
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub exchange: String,
    pub symbol: String,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Port for the Prometheus scrape endpoint; omit to disable the exporter
    #[serde(default = "default_metrics_port")]
    pub metrics_port: Option<u16>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_interval_secs() -> u64 {
    5
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./price_data")
}
fn default_metrics_port() -> Option<u16> {
    Some(9090)
}
fn default_log_level() -> String {
    "info".to_string()
}

fn default_sources() -> Vec<SourceConfig> {
    ["binance", "osl", "hashkey"]
        .into_iter()
        .map(|exchange| SourceConfig {
            exchange: exchange.to_string(),
            symbol: "BTCUSDT".to_string(),
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poller: PollerConfig::default(),
            recorder: RecorderConfig::default(),
            sources: default_sources(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_port: default_metrics_port(),
            log_level: default_log_level(),
        }
    }
}

/// Exchange credentials pulled from the environment at startup.
///
/// All keys are optional for the public ticker reads; sources that don't
/// need credentials must keep working when none are set.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub binance_api_key: Option<String>,
    pub binance_api_secret: Option<String>,
}

impl Credentials {
    /// Read credentials from the environment (populated by `.env` if present)
    pub fn from_env() -> Self {
        Self {
            binance_api_key: env::var("BINANCE_API_KEY").ok(),
            binance_api_secret: env::var("BINANCE_API_SECRET").ok(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
