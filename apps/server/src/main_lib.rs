use std::sync::Arc;

use crate::config::Config;
use ratesync_core::rates::{RatesService, RatesServiceTrait};
use ratesync_market_data::DolarApiProvider;
use ratesync_storage_sqlite::{db, RateRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub rates_service: Arc<dyn RatesServiceTrait>,
    pub db_path: String,
}

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded to it.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Opens the database, applies migrations and wires the provider, repository
/// and service together. Must run inside a Tokio runtime.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone())?;

    let provider = Arc::new(DolarApiProvider::with_timeout(
        Some(config.upstream_url.clone()),
        config.upstream_timeout,
    ));
    tracing::info!("Upstream rate source: {}", provider.base_url());

    let repository = Arc::new(RateRepository::new(pool, writer));
    let rates_service: Arc<dyn RatesServiceTrait> =
        Arc::new(RatesService::new(provider, repository));

    Ok(Arc::new(AppState {
        rates_service,
        db_path,
    }))
}
