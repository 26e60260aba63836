//! REST API
//!
//! Exposes the service descriptor, a liveness probe, and the current ETH/BTC
//! prices. Only `/prices` touches the network.

use crate::{
    config::Config,
    error::{Result, TrackerError},
    price_fetcher::PriceFetcher,
    types::{ErrorResponse, HealthResponse, PricesResponse, SERVICE_NAME, ServiceInfo},
};
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub fetcher: PriceFetcher,
}

impl AppState {
    pub fn new(fetcher: PriceFetcher) -> Self {
        Self { fetcher }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/prices", get(get_prices))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let fetcher = PriceFetcher::from_config(config)?;
    let app = create_router(AppState::new(fetcher));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;

    info!("🌐 Server listening on http://{}", config.bind_address());
    print!("{}", startup_banner(config));

    axum::serve(listener, app).await?;

    Ok(())
}

/// Console lines shown once the listener is bound
pub fn startup_banner(config: &Config) -> String {
    let base = format!("http://localhost:{}", config.server_port);

    format!(
        "🌐 Serving on http://{}\n\
         🔗 Prices: {base}/prices\n\
         💚 Health: {base}/health\n\
         ⏹️  Press Ctrl+C to stop\n",
        config.bind_address(),
    )
}

/// GET /
///
/// Static service descriptor
async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec!["/".to_string(), "/health".to_string(), "/prices".to_string()],
        description: "Live ETH and BTC spot prices in USDT from Binance".to_string(),
    })
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        service: SERVICE_NAME.to_string(),
    })
}

/// GET /prices
///
/// Both prices or a 500; never a partial report.
async fn get_prices(State(state): State<AppState>) -> Result<Response> {
    let report = state.fetcher.fetch_report().await;
    let prices = PricesResponse::try_from(report)?;

    info!("Served prices: ETH={} BTC={}", prices.eth, prices.btc);

    Ok(no_store(Json(prices).into_response()))
}

fn no_store(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);

        let body = Json(ErrorResponse {
            error: "Failed to fetch prices".to_string(),
            message: self.to_string(),
            timestamp: Utc::now(),
        });

        no_store((StatusCode::INTERNAL_SERVER_ERROR, body).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_report_maps_to_500() {
        let response = TrackerError::IncompleteReport(vec!["BTCUSDT".to_string()]).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }

    #[test]
    fn test_fetch_failures_share_error_payload() {
        let response = TrackerError::Parse("bad body".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_startup_banner() {
        let config = Config {
            server_port: 9090,
            ..Config::default()
        };
        let banner = startup_banner(&config);

        assert!(banner.contains("http://0.0.0.0:9090"));
        assert!(banner.contains("http://localhost:9090/prices"));
        assert!(banner.contains("http://localhost:9090/health"));
        assert!(!banner.contains("browser"));
    }
}
