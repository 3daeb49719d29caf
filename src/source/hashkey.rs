//! HashKey REST ticker source

use super::{parse_positive_price, FetchError, PriceObservation, PriceSource};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::ACCEPT;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

pub(super) const EXCHANGE: &str = "hashkey";

/// HashKey Global REST API base URL
const HASHKEY_API_URL: &str = "https://api-glb.hashkey.com";

/// One ticker entry; the endpoint answers with an array of these
#[derive(Debug, Deserialize)]
struct HashKeyTicker {
    #[serde(rename = "s")]
    symbol: String,
    #[serde(rename = "p")]
    price: String,
}

/// Spot ticker source backed by HashKey's `/quote/v1/ticker/price` endpoint
#[derive(Debug)]
pub struct HashKeySource {
    client: Client,
    base_url: String,
    symbol: String,
}

impl HashKeySource {
    pub fn new(client: Client, symbol: impl Into<String>) -> Self {
        Self::with_base_url(client, HASHKEY_API_URL, symbol)
    }

    /// Create a source against a non-default base URL (used in tests)
    pub fn with_base_url(
        client: Client,
        base_url: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            symbol: symbol.into().to_uppercase(),
        }
    }

    fn ticker_url(&self) -> String {
        format!("{}/quote/v1/ticker/price", self.base_url)
    }

    /// Parse a ticker response body into (echoed symbol, price).
    /// HashKey wraps the quote in a one-element array.
    fn parse_ticker(body: &str) -> Result<(String, Decimal), FetchError> {
        let tickers: Vec<HashKeyTicker> =
            serde_json::from_str(body).map_err(|e| FetchError::Payload(e.to_string()))?;
        let ticker = tickers
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Payload("empty ticker array".to_string()))?;
        let price = parse_positive_price(&ticker.price)?;
        Ok((ticker.symbol, price))
    }
}

#[async_trait]
impl PriceSource for HashKeySource {
    fn name(&self) -> &str {
        EXCHANGE
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    async fn fetch(&self) -> Result<PriceObservation, FetchError> {
        let response = self
            .client
            .get(self.ticker_url())
            .query(&[("symbol", self.symbol.as_str())])
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                code: response.status(),
            });
        }

        let body = response.text().await?;
        let (symbol, price) = Self::parse_ticker(&body)?;

        Ok(PriceObservation {
            timestamp: Utc::now(),
            symbol,
            exchange: EXCHANGE.to_string(),
            price,
        })
    }
}
