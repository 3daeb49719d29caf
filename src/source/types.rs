//! Price source types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single normalized price observation from an exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Local timestamp when the observation was taken
    pub timestamp: DateTime<Utc>,
    /// Trading symbol as echoed by the exchange (e.g., "BTCUSDT")
    pub symbol: String,
    /// Source exchange identifier (e.g., "binance")
    pub exchange: String,
    /// Quote price, exchange-native units; always strictly positive
    pub price: Decimal,
}
