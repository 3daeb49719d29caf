//! Exchange price sources
//!
//! One REST client per exchange, all normalized behind the [`PriceSource`]
//! trait. Adding an exchange means adding one module here and one arm in
//! [`build_sources`]; the polling loop never changes.

mod binance;
mod hashkey;
mod osl;
mod types;

pub use binance::BinanceSource;
pub use hashkey::HashKeySource;
pub use osl::OslSource;
pub use types::PriceObservation;

use crate::config::{Credentials, SourceConfig};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Why a fetch produced no observation this round.
///
/// The polling loop treats every variant the same way (log and move on);
/// the taxonomy exists so diagnostics can tell "network down" from
/// "exchange sent garbage".
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, DNS, timeout)
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    /// Exchange answered with a non-success status
    #[error("unexpected http status {code}")]
    Status { code: reqwest::StatusCode },
    /// Response body could not be decoded or was missing fields
    #[error("unusable payload: {0}")]
    Payload(String),
    /// Price field was non-numeric, zero, or negative
    #[error("invalid price {0:?}")]
    InvalidPrice(String),
}

/// Trait for exchange price sources
#[async_trait]
pub trait PriceSource: Send + Sync + std::fmt::Debug {
    /// Exchange identifier used for logging and file naming
    fn name(&self) -> &str;

    /// Symbol this source was configured to poll
    fn symbol(&self) -> &str;

    /// Issue one request to the exchange and normalize the answer
    async fn fetch(&self) -> Result<PriceObservation, FetchError>;
}

/// Construct the configured sources against a shared HTTP client.
///
/// An unrecognized exchange name is a startup error: a source that could
/// never produce data must be rejected here rather than fail every round.
pub fn build_sources(
    client: &Client,
    entries: &[SourceConfig],
    credentials: &Credentials,
) -> anyhow::Result<Vec<Box<dyn PriceSource>>> {
    let mut sources: Vec<Box<dyn PriceSource>> = Vec::with_capacity(entries.len());

    for entry in entries {
        let source: Box<dyn PriceSource> = match entry.exchange.as_str() {
            binance::EXCHANGE => Box::new(BinanceSource::new(
                client.clone(),
                &entry.symbol,
                credentials.binance_api_key.clone(),
            )),
            hashkey::EXCHANGE => Box::new(HashKeySource::new(client.clone(), &entry.symbol)),
            osl::EXCHANGE => Box::new(OslSource::new(client.clone(), &entry.symbol)),
            other => anyhow::bail!("unknown exchange {:?} in [[sources]]", other),
        };
        sources.push(source);
    }

    Ok(sources)
}

/// Parse a price string, rejecting anything that is not strictly positive
pub(crate) fn parse_positive_price(raw: &str) -> Result<Decimal, FetchError> {
    let price =
        Decimal::from_str(raw).map_err(|_| FetchError::InvalidPrice(raw.to_string()))?;
    if price <= Decimal::ZERO {
        return Err(FetchError::InvalidPrice(raw.to_string()));
    }
    Ok(price)
}
