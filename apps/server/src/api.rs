use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use ratesync_core::errors::Error as CoreError;
use ratesync_core::rates::{PersistedRate, RatesResponse, RatesServiceTrait};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub async fn healthz() -> &'static str {
    "ok"
}

/// Live rates with their average. Nothing is stored.
async fn get_rates(State(state): State<Arc<AppState>>) -> ApiResult<Json<RatesResponse>> {
    let response = state.rates_service.run(false).await?;
    Ok(Json(response))
}

/// Fetches and persists the normalized rates.
async fn sync_rates(State(state): State<Arc<AppState>>) -> ApiResult<Json<RatesResponse>> {
    let response = state.rates_service.run(true).await?;
    tracing::info!("Synced {} rates on request", response.rates.len());
    Ok(Json(response))
}

/// Runs a synchronous repository read on the blocking pool.
async fn read_blocking<T, F>(state: &Arc<AppState>, read: F) -> ApiResult<T>
where
    F: FnOnce(&dyn RatesServiceTrait) -> ratesync_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let service = state.rates_service.clone();
    let result = tokio::task::spawn_blocking(move || read(service.as_ref()))
        .await
        .map_err(|e| CoreError::Unexpected(format!("Storage read task failed: {}", e)))?;
    Ok(result?)
}

async fn list_stored_rates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PersistedRate>>> {
    let stored = read_blocking(&state, |service| service.list_stored()).await?;
    Ok(Json(stored))
}

async fn get_stored_rate(
    State(state): State<Arc<AppState>>,
    Path(rate_type): Path<String>,
) -> ApiResult<Json<PersistedRate>> {
    let key = rate_type.clone();
    read_blocking(&state, move |service| service.get_stored(&key))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No stored rate of type '{}'", rate_type)))
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }

    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new().allow_origin(origins)
}

/// Requests exceeding the configured timeout are answered with 408.
fn timeout_layer(config: &Config) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/exchange", get(get_rates))
        .route("/exchange/", get(get_rates))
        .route("/exchange/sync", post(sync_rates))
        .route("/exchange/stored", get(list_stored_rates))
        .route("/exchange/stored/{type}", get(get_stored_rate));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(timeout_layer(config))
        .layer(TraceLayer::new_for_http())
}
