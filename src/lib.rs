//! spotlog: spot-price poller for exchange ticker endpoints
//!
//! This library provides the core components for:
//! - REST price sources (Binance, OSL, HashKey) behind one trait
//! - Append-only CSV recording, one log per (symbol, exchange) pair
//! - A sequential polling loop that survives per-source failures
//! - TOML configuration with env-supplied credentials
//! - Logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod poller;
pub mod recorder;
pub mod source;
pub mod telemetry;
