use super::aggregator::average;
use super::normalization::{normalize_rate_type, normalized_metrics};
use super::rates_model::{Average, PersistedRate, Rate, RateUpsert, RatesResponse};
use super::rates_traits::{RateRepositoryTrait, RatesServiceTrait};
use super::transformer::transform;
use crate::errors::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, info, warn};
use ratesync_market_data::RateProvider;
use std::sync::Arc;

/// Fetch → transform → aggregate → (upsert) pipeline.
#[derive(Clone)]
pub struct RatesService {
    provider: Arc<dyn RateProvider>,
    repository: Arc<dyn RateRepositoryTrait>,
}

impl RatesService {
    pub fn new(provider: Arc<dyn RateProvider>, repository: Arc<dyn RateRepositoryTrait>) -> Self {
        Self {
            provider,
            repository,
        }
    }

    /// Upserts every rate sequentially. Each upsert commits on its own, so an
    /// error leaves the rates before it stored and the rest untouched.
    async fn persist_rates(&self, rates: &[Rate], average: &Average) -> Result<usize> {
        let updated_at = Utc::now().naive_utc();
        let mut stored = 0;

        for rate in rates {
            let rate_type = normalize_rate_type(&rate.name);
            if rate_type.is_empty() {
                warn!("Skipping rate without a name: {:?}", rate);
                continue;
            }

            let (normalized_rate, diff) = normalized_metrics(rate, average);
            let upsert = RateUpsert {
                rate_type,
                buy: rate.buy,
                sell: rate.sell,
                rate: normalized_rate,
                diff,
                updated_at,
            };

            if let Err(e) = self.repository.upsert(upsert).await {
                error!(
                    "Persisting rate '{}' failed after {} of {} rates were stored: {}",
                    rate.name,
                    stored,
                    rates.len(),
                    e
                );
                return Err(e);
            }
            stored += 1;
        }

        Ok(stored)
    }
}

#[async_trait]
impl RatesServiceTrait for RatesService {
    async fn run(&self, persist: bool) -> Result<RatesResponse> {
        debug!("Fetching rates from {}", self.provider.id());
        let raw = self.provider.fetch_rates().await?;

        let rates = transform(&raw)?;
        let average = average(&rates);

        if persist {
            let stored = self.persist_rates(&rates, &average).await?;
            info!("Persisted {} of {} rates", stored, rates.len());
        }

        Ok(RatesResponse { rates, average })
    }

    fn list_stored(&self) -> Result<Vec<PersistedRate>> {
        self.repository.list_all()
    }

    fn get_stored(&self, rate_type: &str) -> Result<Option<PersistedRate>> {
        self.repository.get_by_type(rate_type)
    }
}
