//! Binance REST ticker source

use super::{parse_positive_price, FetchError, PriceObservation, PriceSource};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::ACCEPT;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

pub(super) const EXCHANGE: &str = "binance";

/// Binance REST API base URL
const BINANCE_API_URL: &str = "https://api.binance.com";

/// Binance symbol ticker response
#[derive(Debug, Deserialize)]
struct BinanceTicker {
    symbol: String,
    price: String,
}

/// Spot ticker source backed by Binance's `/api/v3/ticker/price` endpoint
#[derive(Debug)]
pub struct BinanceSource {
    client: Client,
    base_url: String,
    symbol: String,
    api_key: Option<String>,
}

impl BinanceSource {
    /// Create a source for the given symbol. The API key is optional;
    /// the public ticker endpoint does not require one.
    pub fn new(client: Client, symbol: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_base_url(client, BINANCE_API_URL, symbol, api_key)
    }

    /// Create a source against a non-default base URL (used in tests)
    pub fn with_base_url(
        client: Client,
        base_url: impl Into<String>,
        symbol: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            symbol: symbol.into().to_uppercase(),
            api_key,
        }
    }

    fn ticker_url(&self) -> String {
        format!("{}/api/v3/ticker/price", self.base_url)
    }

    /// Parse a ticker response body into (echoed symbol, price)
    fn parse_ticker(body: &str) -> Result<(String, Decimal), FetchError> {
        let ticker: BinanceTicker =
            serde_json::from_str(body).map_err(|e| FetchError::Payload(e.to_string()))?;
        let price = parse_positive_price(&ticker.price)?;
        Ok((ticker.symbol, price))
    }
}

#[async_trait]
impl PriceSource for BinanceSource {
    fn name(&self) -> &str {
        EXCHANGE
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    async fn fetch(&self) -> Result<PriceObservation, FetchError> {
        let mut request = self
            .client
            .get(self.ticker_url())
            .query(&[("symbol", self.symbol.as_str())])
            .header(ACCEPT, "application/json");

        if let Some(ref key) = self.api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        let response = request.send().await?;
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
