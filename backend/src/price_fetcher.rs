//! Price Fetcher
//!
//! Fetches a single spot price per call from the exchange ticker endpoint.
//!
//! # Flow
//! ```text
//! fetch("ETHUSDT") → GET <base>?symbol=ETHUSDT → {"symbol":"ETHUSDT","price":"3456.78"}
//!                                                        ↓
//!                                        Decimal::from_str_exact("3456.78") → PriceQuote
//! ```
//!
//! No retries and no caching: every call is a fresh round-trip bounded by the
//! client timeout.

use crate::{
    config::Config,
    error::{Result, TrackerError},
    types::{BTC_SYMBOL, ETH_SYMBOL, PriceQuote, PriceReport, TickerPrice},
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest upstream error body echoed back in an error message
const MAX_UPSTREAM_MESSAGE_LEN: usize = 200;

/// HTTP client for the exchange ticker endpoint
#[derive(Debug, Clone)]
pub struct PriceFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl PriceFetcher {
    /// Create a new fetcher
    ///
    /// # Arguments
    /// * `base_url` - Ticker endpoint, queried as `<base_url>?symbol=<PAIR>`
    /// * `timeout` - Whole-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.price_api_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current price for one trading pair
    ///
    /// # Errors
    /// * `InvalidSymbol` - Empty or non-alphanumeric pair code (no request is made)
    /// * `Network` - Connection failure or timeout
    /// * `UpstreamStatus` - Non-2xx response
    /// * `Parse` - Malformed JSON, missing `price`, or a price that is not a decimal
    pub async fn fetch(&self, symbol: &str) -> Result<PriceQuote> {
        validate_symbol(symbol)?;

        debug!("Fetching price for {} from {}", symbol, self.base_url);

        let response = self.client
            .get(&self.base_url)
            .query(&[("symbol", symbol)])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(TrackerError::UpstreamStatus {
                symbol: symbol.to_string(),
                status,
                message: upstream_message(&body),
            });
        }

        let body = response.text().await?;
        let quote = parse_quote(symbol, &body)?;

        debug!("Price for {}: {}", symbol, quote.price);

        Ok(quote)
    }

    /// Fetch a price, logging and discarding any failure
    pub async fn fetch_quote(&self, symbol: &str) -> Option<PriceQuote> {
        match self.fetch(symbol).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                warn!("Failed to fetch price for {}: {}", symbol, e);
                None
            }
        }
    }

    /// Fetch ETH and BTC quotes into a fresh report.
    ///
    /// The two requests are independent and run concurrently; an absent
    /// quote marks that symbol as failed.
    pub async fn fetch_report(&self) -> PriceReport {
        let (eth, btc) = tokio::join!(
            self.fetch_quote(ETH_SYMBOL),
            self.fetch_quote(BTC_SYMBOL),
        );

        PriceReport::new(eth, btc)
    }
}

fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(TrackerError::InvalidSymbol(symbol.to_string()));
    }

    Ok(())
}

/// Parse a ticker body into a quote without going through `f64`
fn parse_quote(symbol: &str, body: &str) -> Result<PriceQuote> {
    let ticker: TickerPrice = serde_json::from_str(body)
        .map_err(|e| TrackerError::Parse(format!("Invalid ticker response for {}: {}", symbol, e)))?;

    if let Some(echoed) = &ticker.symbol {
        if echoed != symbol {
            return Err(TrackerError::Parse(format!(
                "Requested {} but upstream answered for {}",
                symbol, echoed
            )));
        }
    }

    // from_str would round digits beyond Decimal's 28-digit precision
    let price = Decimal::from_str_exact(ticker.price.trim())
        .map_err(|e| TrackerError::Parse(format!(
            "Invalid price {:?} for {}: {}",
            ticker.price, symbol, e
        )))?;

    Ok(PriceQuote {
        symbol: symbol.to_string(),
        price,
        fetched_at: Utc::now(),
    })
}

/// Binance reports errors as `{"code":-1121,"msg":"Invalid symbol."}`
fn upstream_message(body: &str) -> String {
    let msg = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("msg").and_then(|m| m.as_str()).map(str::to_string));

    match msg {
        Some(msg) => msg,
        None => body.trim().chars().take(MAX_UPSTREAM_MESSAGE_LEN).collect(),
    }
}
