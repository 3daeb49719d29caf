//! Append-only CSV recorder
//!
//! One log file per (symbol, exchange) pair under the data directory. Each
//! file starts with a `Timestamp,Symbol,Price` header and grows by one row
//! per observation, flushed before the append returns.

use crate::source::PriceObservation;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column header written to every fresh log file
pub const CSV_HEADER: &str = "Timestamp,Symbol,Price";

/// Timestamp column format, UTC with microseconds
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A failed append, after the fallback location was also tried
#[derive(Debug, Error)]
#[error("failed to append to {path}: {source}")]
pub struct RecordError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Records observations to per-pair CSV logs
pub struct CsvRecorder {
    data_dir: PathBuf,
    fallback_dir: PathBuf,
}

impl CsvRecorder {
    /// Create a recorder writing under `data_dir`, falling back to a
    /// spotlog directory under the system temp dir if that is unwritable
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_fallback(data_dir, std::env::temp_dir().join("spotlog"))
    }

    /// Create a recorder with an explicit fallback directory
    pub fn with_fallback(data_dir: impl Into<PathBuf>, fallback_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            fallback_dir: fallback_dir.into(),
        }
    }

    /// Primary data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Log file name for an observation: `{symbol}_{exchange}.csv`.
    /// Stable per pair, so the same pair on the same exchange always lands
    /// in the same file and distinct pairs never collide.
    pub fn file_name(observation: &PriceObservation) -> String {
        format!("{}_{}.csv", observation.symbol, observation.exchange)
    }

    /// Append one observation, returning the path it was written to.
    ///
    /// If the primary directory cannot be written, the row is retried under
    /// the fallback directory rather than dropped; only a failure of both
    /// surfaces as an error, and that error covers this append alone.
    pub fn append(&self, observation: &PriceObservation) -> Result<PathBuf, RecordError> {
        let primary = self.data_dir.join(Self::file_name(observation));
        match Self::append_at(&primary, observation) {
            Ok(()) => Ok(primary),
            Err(primary_err) => {
                tracing::warn!(
                    path = %primary.display(),
                    error = %primary_err,
                    "primary data dir unwritable, using fallback"
                );
                let fallback = self.fallback_dir.join(Self::file_name(observation));
                match Self::append_at(&fallback, observation) {
                    Ok(()) => Ok(fallback),
                    Err(source) => Err(RecordError {
                        path: fallback,
                        source,
                    }),
                }
            }
        }
    }

    /// Append one row at `path`, creating the parent directory and the
    /// header line as needed, and flushing before returning
    fn append_at(path: &Path, observation: &PriceObservation) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_fresh = file.metadata()?.len() == 0;

        let mut writer = BufWriter::new(file);
        if is_fresh {
            writeln!(writer, "{}", CSV_HEADER)?;
        }
        writeln!(
            writer,
            "{},{},{}",
            observation.timestamp.format(TIMESTAMP_FORMAT),
            observation.symbol,
            observation.price
        )?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn observation(symbol: &str, exchange: &str, price: rust_decimal::Decimal) -> PriceObservation {
        PriceObservation {
            timestamp: Utc::now(),
            symbol: symbol.to_string(),
            exchange: exchange.to_string(),
            price,
        }
    }

    #[test]
    fn test_file_name_keys_on_symbol_and_exchange() {
        let obs = observation("BTCUSDT", "binance", dec!(65000.50));
        assert_eq!(CsvRecorder::file_name(&obs), "BTCUSDT_binance.csv");
    }

    #[test]
    fn test_fresh_log_gets_header_and_one_row() {
        let dir = TempDir::new().unwrap();
        let recorder = CsvRecorder::new(dir.path());

        let obs = observation("BTCUSDT", "binance", dec!(65000.50));
        let path = recorder.append(&obs).unwrap();
        assert_eq!(path, dir.path().join("BTCUSDT_binance.csv"));

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Timestamp,Symbol,Price");
        assert!(lines[1].ends_with(",BTCUSDT,65000.50"));
    }

    #[test]
    fn test_appends_preserve_prior_rows() {
        let dir = TempDir::new().unwrap();
        let recorder = CsvRecorder::new(dir.path());

        for _ in 0..3 {
            recorder
                .append(&observation("BTCUSDT", "binance", dec!(100)))
                .unwrap();
        }
        let path = dir.path().join("BTCUSDT_binance.csv");
        let first_pass = fs::read_to_string(&path).unwrap();
        assert_eq!(first_pass.lines().count(), 4); // header + 3

        // Replaying the same appends adds rows, no dedup
        for _ in 0..3 {
            recorder
                .append(&observation("BTCUSDT", "binance", dec!(100)))
                .unwrap();
        }
        let second_pass = fs::read_to_string(&path).unwrap();
        assert!(second_pass.starts_with(&first_pass));
        assert_eq!(second_pass.lines().count(), 7); // header + 6
    }

    #[test]
    fn test_distinct_pairs_get_distinct_files() {
        let dir = TempDir::new().unwrap();
        let recorder = CsvRecorder::new(dir.path());

        recorder
            .append(&observation("BTCUSDT", "binance", dec!(1)))
            .unwrap();
        recorder
            .append(&observation("BTCUSDT", "hashkey", dec!(2)))
            .unwrap();
        recorder
            .append(&observation("ETHUSDT", "binance", dec!(3)))
            .unwrap();

        assert!(dir.path().join("BTCUSDT_binance.csv").exists());
        assert!(dir.path().join("BTCUSDT_hashkey.csv").exists());
        assert!(dir.path().join("ETHUSDT_binance.csv").exists());
    }

    #[test]
    fn test_fallback_when_primary_unwritable() {
        let dir = TempDir::new().unwrap();
        // Occupy the primary path with a plain file so create_dir_all fails
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, "not a directory").unwrap();

        let fallback = TempDir::new().unwrap();
        let recorder = CsvRecorder::with_fallback(blocked.join("nested"), fallback.path());

        let obs = observation("BTCUSDT", "binance", dec!(65000.50));
        let path = recorder.append(&obs).unwrap();
        assert_eq!(path, fallback.path().join("BTCUSDT_binance.csv"));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_error_when_both_locations_unwritable() {
        let dir = TempDir::new().unwrap();
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, "not a directory").unwrap();

        let recorder =
            CsvRecorder::with_fallback(blocked.join("primary"), blocked.join("fallback"));
        let obs = observation("BTCUSDT", "binance", dec!(1));
        let err = recorder.append(&obs).unwrap_err();
        assert!(err.path.ends_with("BTCUSDT_binance.csv"));
    }
}
