//! Wire and domain types.
//!
//! Monetary values are always carried as decimal strings on the wire
//! (`"67890.12"`, never `67890.12`) so they survive any JSON consumer without
//! passing through a binary float.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Ethereum spot pair
pub const ETH_SYMBOL: &str = "ETHUSDT";

/// Bitcoin spot pair
pub const BTC_SYMBOL: &str = "BTCUSDT";

/// Quote currency shared by both pairs
pub const QUOTE_CURRENCY: &str = "USDT";

pub const SERVICE_NAME: &str = "crypto-price-tracker";

/// Upstream ticker payload, e.g. `{"symbol":"ETHUSDT","price":"3456.78000000"}`
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    #[serde(default)]
    pub symbol: Option<String>,

    /// Kept as text until converted to `Decimal`
    pub price: String,
}

/// A single price observation for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Trading pair (e.g., "ETHUSDT")
    pub symbol: String,

    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,

    pub fetched_at: DateTime<Utc>,
}

/// ETH and BTC quotes bundled for one caller; a failed fetch is `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceReport {
    pub eth: Option<PriceQuote>,
    pub btc: Option<PriceQuote>,
    pub timestamp: DateTime<Utc>,
    pub currency: String,
}

impl PriceReport {
    pub fn new(eth: Option<PriceQuote>, btc: Option<PriceQuote>) -> Self {
        Self {
            eth,
            btc,
            timestamp: Utc::now(),
            currency: QUOTE_CURRENCY.to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.eth.is_some() && self.btc.is_some()
    }

    /// Symbols whose quote is absent, in ETH, BTC order
    pub fn missing_symbols(&self) -> Vec<String> {
        [(ETH_SYMBOL, &self.eth), (BTC_SYMBOL, &self.btc)]
            .into_iter()
            .filter(|(_, quote)| quote.is_none())
            .map(|(symbol, _)| symbol.to_string())
            .collect()
    }

    /// BTC price expressed in ETH.
    ///
    /// Only defined when both prices are present and strictly positive.
    pub fn btc_eth_ratio(&self) -> Option<Decimal> {
        let eth = self.eth.as_ref()?.price;
        let btc = self.btc.as_ref()?.price;

        if eth <= Decimal::ZERO || btc <= Decimal::ZERO {
            return None;
        }

        btc.checked_div(eth)
    }
}

/// Body of a successful `GET /prices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricesResponse {
    #[serde(rename = "ETH", with = "rust_decimal::serde::str")]
    pub eth: Decimal,

    #[serde(rename = "BTC", with = "rust_decimal::serde::str")]
    pub btc: Decimal,

    pub timestamp: DateTime<Utc>,
    pub currency: String,
}

impl TryFrom<PriceReport> for PricesResponse {
    type Error = TrackerError;

    fn try_from(report: PriceReport) -> Result<Self, Self::Error> {
        let missing = report.missing_symbols();

        match (report.eth, report.btc) {
            (Some(eth), Some(btc)) => Ok(Self {
                eth: eth.price,
                btc: btc.price,
                timestamp: report.timestamp,
                currency: report.currency,
            }),
            _ => Err(TrackerError::IncompleteReport(missing)),
        }
    }
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub endpoints: Vec<String>,
    pub description: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
}

/// Body of any failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn quote(symbol: &str, price: &str) -> PriceQuote {
        PriceQuote {
            symbol: symbol.to_string(),
            price: Decimal::from_str(price).unwrap(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_ratio_requires_positive_prices() {
        let report = PriceReport::new(Some(quote(ETH_SYMBOL, "2000")), Some(quote(BTC_SYMBOL, "60000")));
        assert_eq!(report.btc_eth_ratio(), Some(Decimal::from(30)));

        let report = PriceReport::new(Some(quote(ETH_SYMBOL, "0")), Some(quote(BTC_SYMBOL, "60000")));
        assert_eq!(report.btc_eth_ratio(), None);

        let report = PriceReport::new(Some(quote(ETH_SYMBOL, "2000")), Some(quote(BTC_SYMBOL, "-1")));
        assert_eq!(report.btc_eth_ratio(), None);

        let report = PriceReport::new(None, Some(quote(BTC_SYMBOL, "60000")));
        assert_eq!(report.btc_eth_ratio(), None);
    }

    #[test]
    fn test_missing_symbols() {
        let report = PriceReport::new(Some(quote(ETH_SYMBOL, "2000")), None);
        assert!(!report.is_complete());
        assert_eq!(report.missing_symbols(), vec![BTC_SYMBOL.to_string()]);

        let report = PriceReport::new(None, None);
        assert_eq!(report.missing_symbols(), vec![ETH_SYMBOL.to_string(), BTC_SYMBOL.to_string()]);
    }

    #[test]
    fn test_incomplete_report_is_rejected() {
        let report = PriceReport::new(None, Some(quote(BTC_SYMBOL, "60000")));

        match PricesResponse::try_from(report) {
            Err(TrackerError::IncompleteReport(missing)) => assert_eq!(missing, vec![ETH_SYMBOL]),
            other => panic!("expected IncompleteReport, got {:?}", other),
        }
    }

    #[test]
    fn test_prices_serialize_as_strings() {
        let report = PriceReport::new(
            Some(quote(ETH_SYMBOL, "3456.78000000")),
            Some(quote(BTC_SYMBOL, "67890.12345678")),
        );
        let response = PricesResponse::try_from(report).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["ETH"], "3456.78000000");
        assert_eq!(json["BTC"], "67890.12345678");
        assert_eq!(json["currency"], "USDT");
    }

    #[test]
    fn test_report_round_trip_keeps_exact_decimals() {
        // 0.1 + 0.2 style values would drift through an f64
        let report = PriceReport::new(
            Some(quote(ETH_SYMBOL, "0.30000000000000004441")),
            Some(quote(BTC_SYMBOL, "98765.43210987654321")),
        );

        let json = serde_json::to_string(&report).unwrap();
        let parsed: PriceReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, report);
        assert_eq!(
            parsed.btc.unwrap().price,
            Decimal::from_str("98765.43210987654321").unwrap()
        );
    }
}
