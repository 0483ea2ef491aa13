//! Error types for the rate source client.
//!
//! Every failure of a fetch is classified into one of three kinds so the
//! boundary layers can map them without inspecting messages:
//! - [`RateSourceError::Connectivity`]: the provider could not be reached
//! - [`RateSourceError::Upstream`]: the provider answered with a non-2xx status
//! - [`RateSourceError::InvalidData`]: the provider answered 2xx with a body
//!   that is not JSON

use thiserror::Error;

/// Errors that can occur while fetching quotes from a provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateSourceError {
    /// Transport-level failure: connection refused, timeout, DNS failure.
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// The provider returned a non-success HTTP status.
    #[error("Upstream error ({status}): {body}")]
    Upstream {
        /// HTTP status code returned by the provider
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The provider returned a payload that could not be decoded.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RateSourceError {
    /// Returns the upstream status code, if the provider answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Connectivity(_) | Self::InvalidData(_) => None,
        }
    }
}
