//! Integration tests for configuration loading

use spotlog::config::Config;
use std::io::Write;

#[test]
fn test_example_config_loads() {
    let config: Config = toml::from_str(include_str!("../config.toml.example")).unwrap();
    assert_eq!(config.poller.interval_secs, 5);
    assert_eq!(config.sources.len(), 3);
    assert_eq!(config.sources[0].exchange, "binance");
    assert_eq!(config.sources[0].symbol, "BTCUSDT");
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [poller]
        interval_secs = 1

        [[sources]]
        exchange = "binance"
        symbol = "ETHUSDT"
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.poller.interval_secs, 1);
    assert_eq!(config.sources.len(), 1);
    assert_eq!(config.sources[0].symbol, "ETHUSDT");
}

#[test]
fn test_load_rejects_broken_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[poller\ninterval_secs = 1").unwrap();
    assert!(Config::load(file.path()).is_err());
}
