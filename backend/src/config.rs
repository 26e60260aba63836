use std::time::Duration;

use serde::Deserialize;

/// Binance spot ticker endpoint
pub const DEFAULT_PRICE_API_URL: &str = "https://api.binance.com/api/v3/ticker/price";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Upstream price endpoint, queried as `<url>?symbol=<PAIR>`
    pub price_api_url: String,

    /// Per-request network timeout (seconds)
    pub request_timeout_secs: u64,

    /// Server host
    pub server_host: String,

    /// Server port
    pub server_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            request_timeout_secs: 10,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Config {
            price_api_url: std::env::var("PRICE_API_URL")
                .unwrap_or(defaults.price_api_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.request_timeout_secs.to_string())
                .parse()?,
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or(defaults.server_host),
            server_port: std::env::var("SERVER_PORT")
                .unwrap_or_else(|_| defaults.server_port.to_string())
                .parse()?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
