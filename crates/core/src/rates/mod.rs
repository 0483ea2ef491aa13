//! Exchange rates module - domain models, pipeline stages, service, and traits.

pub mod aggregator;
pub mod normalization;
mod rates_model;
mod rates_service;
mod rates_traits;
pub mod transformer;


pub use aggregator::average;
pub use normalization::{normalize_rate_type, normalized_metrics, round_half_up};
pub use rates_model::{Average, PersistedRate, Rate, RateUpsert, RatesResponse};
pub use rates_service::RatesService;
pub use rates_traits::{RateRepositoryTrait, RatesServiceTrait};
pub use transformer::transform;
