//! Rate provider trait definition.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::RateSourceError;

/// Trait for exchange rate providers.
///
/// A provider issues a single request per call and returns the decoded
/// payload as-is. It must not retry or cache.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use ratesync_market_data::{RateProvider, RateSourceError};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl RateProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch_rates(&self) -> Result<serde_json::Value, RateSourceError> {
///         Ok(serde_json::json!([]))
///     }
/// }
/// ```
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Fetch all quotes offered by the provider.
    ///
    /// On success the decoded JSON body is returned without any validation
    /// of its shape.
    async fn fetch_rates(&self) -> Result<Value, RateSourceError>;
}
