//! Polling loop
//!
//! One sequential pass over the configured sources per round, then a fixed
//! sleep. A failed source never aborts the round; a failed append never
//! aborts the process.

use crate::recorder::CsvRecorder;
use crate::source::PriceSource;
use crate::telemetry;
use std::time::Duration;

/// Outcome of one polling round
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    /// Observations fetched and durably appended
    pub recorded: usize,
    /// Sources that produced no row this round (fetch or append failure)
    pub failed: usize,
}

/// Polls every configured source on a fixed cadence and records the results
pub struct Poller {
    sources: Vec<Box<dyn PriceSource>>,
    recorder: CsvRecorder,
    interval: Duration,
}

impl Poller {
    pub fn new(
        sources: Vec<Box<dyn PriceSource>>,
        recorder: CsvRecorder,
        interval: Duration,
    ) -> Self {
        Self {
            sources,
            recorder,
            interval,
        }
    }

    /// Poll every source once, in configuration order
    pub async fn run_round(&self) -> RoundSummary {
        let mut summary = RoundSummary::default();

        for source in &self.sources {
            match source.fetch().await {
                Ok(observation) => {
                    telemetry::fetch_succeeded(source.name());
                    match self.recorder.append(&observation) {
                        Ok(path) => {
                            telemetry::row_appended(source.name());
                            tracing::debug!(
                                exchange = source.name(),
                                symbol = %observation.symbol,
                                price = %observation.price,
                                path = %path.display(),
                                "recorded observation"
                            );
                            summary.recorded += 1;
                        }
                        Err(e) => {
                            tracing::error!(
                                exchange = source.name(),
                                error = %e,
                                "observation lost, could not append"
                            );
                            summary.failed += 1;
                        }
                    }
                }
                Err(e) => {
                    telemetry::fetch_failed(source.name());
                    tracing::warn!(
                        exchange = source.name(),
                        symbol = source.symbol(),
                        error = %e,
                        "fetch failed, no data this round"
                    );
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    /// Run rounds forever. Free-running: the sleep is fixed regardless of
    /// how long the round took, and there is no checkpoint or backfill.
    pub async fn run(&self) {
        tracing::info!(
            sources = self.sources.len(),
            interval_secs = self.interval.as_secs_f64(),
            "polling started"
        );

        loop {
            let summary = self.run_round().await;
            tracing::debug!(
                recorded = summary.recorded,
                failed = summary.failed,
                "round complete"
            );
            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FetchError, PriceObservation};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    /// Deterministic source for loop tests: either always quotes a fixed
    /// price or always fails
    #[derive(Debug)]
    struct MockSource {
        name: &'static str,
        symbol: &'static str,
        price: Option<Decimal>,
    }

    impl MockSource {
        fn quoting(name: &'static str, symbol: &'static str, price: Decimal) -> Self {
            Self {
                name,
                symbol,
                price: Some(price),
            }
        }

        fn failing(name: &'static str, symbol: &'static str) -> Self {
            Self {
                name,
                symbol,
                price: None,
            }
        }
    }

    #[async_trait]
    impl PriceSource for MockSource {
        fn name(&self) -> &str {
            self.name
        }

        fn symbol(&self) -> &str {
            self.symbol
        }

        async fn fetch(&self) -> Result<PriceObservation, FetchError> {
            match self.price {
                Some(price) => Ok(PriceObservation {
                    timestamp: Utc::now(),
                    symbol: self.symbol.to_string(),
                    exchange: self.name.to_string(),
                    price,
                }),
                None => Err(FetchError::Status {
                    code: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_round_with_mixed_outcomes() {
        let dir = TempDir::new().unwrap();
        let sources: Vec<Box<dyn PriceSource>> = vec![
            Box::new(MockSource::quoting("binance", "BTCUSDT", dec!(65000.50))),
            Box::new(MockSource::failing("hashkey", "BTCUSDT")),
        ];
        let poller = Poller::new(
            sources,
            CsvRecorder::new(dir.path()),
            Duration::from_secs(1),
        );

        let summary = poller.run_round().await;
        assert_eq!(summary.recorded, 1);
        assert_eq!(summary.failed, 1);

        // Only the succeeding source produced a file
        let content = std::fs::read_to_string(dir.path().join("BTCUSDT_binance.csv")).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.lines().nth(1).unwrap().contains("65000.50"));
        assert!(!dir.path().join("BTCUSDT_hashkey.csv").exists());
    }

    #[tokio::test]
    async fn test_failing_source_never_aborts_later_sources() {
        let dir = TempDir::new().unwrap();
        let sources: Vec<Box<dyn PriceSource>> = vec![
            Box::new(MockSource::failing("hashkey", "BTCUSDT")),
            Box::new(MockSource::quoting("osl", "BTCUSD", dec!(64950))),
        ];
        let poller = Poller::new(
            sources,
            CsvRecorder::new(dir.path()),
            Duration::from_secs(1),
        );

        let summary = poller.run_round().await;
        assert_eq!(summary.recorded, 1);
        assert!(dir.path().join("BTCUSD_osl.csv").exists());
    }

    #[tokio::test]
    async fn test_consecutive_rounds_accumulate_in_order() {
        let dir = TempDir::new().unwrap();
        let sources: Vec<Box<dyn PriceSource>> =
            vec![Box::new(MockSource::quoting("binance", "BTCUSDT", dec!(100)))];
        let poller = Poller::new(
            sources,
            CsvRecorder::new(dir.path()),
            Duration::from_millis(10),
        );

        poller.run_round().await;
        poller.run_round().await;

        let content = std::fs::read_to_string(dir.path().join("BTCUSDT_binance.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 rounds

        // Timestamps are non-decreasing on a stable clock
        let ts1 = lines[1].split(',').next().unwrap();
        let ts2 = lines[2].split(',').next().unwrap();
        assert!(ts2 >= ts1);
    }

    #[tokio::test]
    async fn test_empty_source_list_is_a_noop_round() {
        let dir = TempDir::new().unwrap();
        let poller = Poller::new(
            Vec::new(),
            CsvRecorder::new(dir.path()),
            Duration::from_secs(1),
        );
        let summary = poller.run_round().await;
        assert_eq!(summary, RoundSummary::default());
    }
}
