use super::rates_model::{PersistedRate, RateUpsert, RatesResponse};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait defining the contract for persisted rate operations.
#[async_trait]
pub trait RateRepositoryTrait: Send + Sync {
    /// Updates the record keyed by `upsert.rate_type`, or inserts it when absent.
    async fn upsert(&self, upsert: RateUpsert) -> Result<PersistedRate>;
    fn list_all(&self) -> Result<Vec<PersistedRate>>;
    fn get_by_type(&self, rate_type: &str) -> Result<Option<PersistedRate>>;
}

/// Trait defining the contract for the sync pipeline.
#[async_trait]
pub trait RatesServiceTrait: Send + Sync {
    /// Runs one sync cycle, persisting normalized rates when `persist` is set.
    async fn run(&self, persist: bool) -> Result<RatesResponse>;
    fn list_stored(&self) -> Result<Vec<PersistedRate>>;
    fn get_stored(&self, rate_type: &str) -> Result<Option<PersistedRate>>;
}
