//! Prometheus metrics

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{Ipv4Addr, SocketAddr};

const FETCH_SUCCESS_TOTAL: &str = "spotlog_fetch_success_total";
const FETCH_FAILURE_TOTAL: &str = "spotlog_fetch_failure_total";
const ROWS_APPENDED_TOTAL: &str = "spotlog_rows_appended_total";

/// Start the Prometheus scrape endpoint on the given port.
/// A bind failure here is a startup failure, not something to limp past.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter on {}: {}", addr, e))?;

    tracing::info!(%addr, "Prometheus metrics exporter listening");
    Ok(())
}

/// Count a successful fetch for an exchange
pub fn fetch_succeeded(exchange: &str) {
    metrics::counter!(FETCH_SUCCESS_TOTAL, "exchange" => exchange.to_string()).increment(1);
}

/// Count a failed fetch for an exchange
pub fn fetch_failed(exchange: &str) {
    metrics::counter!(FETCH_FAILURE_TOTAL, "exchange" => exchange.to_string()).increment(1);
}

/// Count a durably appended observation row
pub fn row_appended(exchange: &str) {
    metrics::counter!(ROWS_APPENDED_TOTAL, "exchange" => exchange.to_string()).increment(1);
}
