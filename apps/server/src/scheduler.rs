//! Background scheduler for periodic rate sync.
//!
//! Fetches and persists the rates on a fixed interval (2 hours by default).

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

use ratesync_core::rates::{RatesResponse, RatesServiceTrait};

use crate::main_lib::AppState;

/// Starts the background sync scheduler. The first run happens one full
/// interval after start.
pub fn start_rate_sync_scheduler(state: Arc<AppState>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Rate sync scheduler started ({}s interval)",
            period.as_secs()
        );

        let mut sync_interval = interval_at(Instant::now() + period, period);
        sync_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            sync_interval.tick().await;
            if let Err(e) = run_scheduled_sync(state.rates_service.as_ref()).await {
                error!("Scheduled rate sync failed: {}", e);
            }
        }
    })
}

/// Runs one scheduled sync, persisting the result.
pub async fn run_scheduled_sync(
    service: &dyn RatesServiceTrait,
) -> ratesync_core::Result<RatesResponse> {
    info!("Running scheduled rate sync...");

    let response = service.run(true).await?;
    let pretty = serde_json::to_string_pretty(&response).unwrap_or_default();
    info!(
        "Scheduled rate sync completed: {} rates stored\n{}",
        response.rates.len(),
        pretty
    );
    Ok(response)
}
