//! API route definitions

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use arb_core::{CoreError, LegacyQuote, PriceFeedError};
use arb_detector::ScanCache;

use crate::config::ServerConfig;

/// Symbol served by the legacy `/fiyatlar` endpoint
pub const LEGACY_SYMBOL: &str = "BTC";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: ScanCache,
}

impl AppState {
    pub fn new(cache: ScanCache) -> Self {
        Self { cache }
    }
}

/// Handler failures, rendered as `{hata: true, mesaj}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Upstream(#[from] PriceFeedError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    hata: bool,
    mesaj: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Core(CoreError::SymbolNotFound(_)) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected: {}", self);
        }

        let body = ErrorBody {
            hata: true,
            mesaj: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Readiness banner
async fn index(State(state): State<AppState>) -> String {
    format!(
        "Arbitrage monitor ready. Tracking {} symbols.",
        state.cache.scanner().watchlist().len()
    )
}

/// Full ranked comparison
async fn coins(State(state): State<AppState>) -> Result<Response, ApiError> {
    let result = state.cache.get().await?;
    Ok(Json(&*result).into_response())
}

/// Legacy single-symbol view
async fn legacy_prices(State(state): State<AppState>) -> Result<Json<LegacyQuote>, ApiError> {
    let result = state.cache.get().await?;
    let record = result
        .find(LEGACY_SYMBOL)
        .ok_or_else(|| CoreError::SymbolNotFound(LEGACY_SYMBOL.to_string()))?;
    Ok(Json(record.to_legacy()))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin {:?}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
}

/// Build the application router
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/coins", get(coins))
        .route("/fiyatlar", get(legacy_prices))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
