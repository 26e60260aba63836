pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod price_fetcher;
pub mod report;
pub mod types;

pub use error::{Result, TrackerError};
pub use price_fetcher::PriceFetcher;
pub use types::{PriceQuote, PriceReport, PricesResponse};
