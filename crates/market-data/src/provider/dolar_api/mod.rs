//! DolarAPI provider for Argentine peso exchange rates.
//!
//! Fetches every dollar quote type ("Oficial", "Blue", "Bolsa", ...) in a
//! single call to `GET {base}/dolares`. The endpoint answers with a JSON
//! array of objects shaped `{nombre, compra, venta, fechaActualizacion}`.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::RateSourceError;
use crate::provider::RateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "DOLAR_API";

/// Default base endpoint of the public API
pub const DEFAULT_BASE_URL: &str = "https://dolarapi.com/v1";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// DolarAPI provider.
///
/// # Example
///
/// ```ignore
/// use ratesync_market_data::DolarApiProvider;
///
/// let provider = DolarApiProvider::new(None);
/// let payload = provider.fetch_rates().await?;
/// ```
pub struct DolarApiProvider {
    client: Client,
    base_url: String,
}

impl DolarApiProvider {
    /// Create a provider against `base_url`, or the public API when `None`.
    pub fn new(base_url: Option<String>) -> Self {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Create a provider with an explicit request timeout.
    pub fn with_timeout(base_url: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rates_url(&self) -> String {
        format!("{}/dolares", self.base_url)
    }
}

#[async_trait]
impl RateProvider for DolarApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_rates(&self) -> Result<Value, RateSourceError> {
        let url = self.rates_url();
        debug!("{}: GET {}", PROVIDER_ID, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RateSourceError::Connectivity(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{}: upstream answered {} for {}", PROVIDER_ID, status, url);
            return Err(RateSourceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RateSourceError::Connectivity(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| RateSourceError::InvalidData(e.to_string()))
    }
}
