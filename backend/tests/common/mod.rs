use crypto_price_tracker::PriceFetcher;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const TICKER_PATH: &str = "/api/v3/ticker/price";

pub fn fetcher_for(server: &MockServer) -> PriceFetcher {
    PriceFetcher::new(format!("{}{}", server.uri(), TICKER_PATH), Duration::from_secs(2))
        .expect("client builds")
}

pub async fn mount_price(server: &MockServer, symbol: &str, price: &str) {
    Mock::given(method("GET"))
        .and(path(TICKER_PATH))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": symbol,
            "price": price,
        })))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, symbol: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(TICKER_PATH))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "code": -1121,
            "msg": "Invalid symbol.",
        })))
        .mount(server)
        .await;
}
