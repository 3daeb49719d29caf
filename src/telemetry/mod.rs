//! Telemetry module
//!
//! Structured logging plus a Prometheus scrape endpoint

mod logging;
mod metrics;

pub use logging::init_logging;
pub use metrics::{fetch_failed, fetch_succeeded, init_metrics, row_appended};

use crate::config::TelemetryConfig;

/// Guard that cleans up telemetry on drop
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level)?;

    if let Some(port) = config.metrics_port {
        init_metrics(port)?;
    }

    Ok(TelemetryGuard { _priv: () })
}
