//! Ratesync Market Data Crate
//!
//! This crate fetches raw exchange rate quotes from the external provider.
//!
//! # Overview
//!
//! A provider performs exactly one outbound request per call and hands back
//! the decoded JSON payload untouched. Field extraction and defaulting is the
//! job of the transformer in `ratesync-core`, so nothing here inspects the
//! individual records.
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |   RateProvider   | --> |  GET /dolares    | --> |  serde_json::Value|
//! +------------------+     +------------------+     +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`RateProvider`] - Trait implemented by rate sources
//! - [`DolarApiProvider`] - DolarAPI implementation
//! - [`RateSourceError`] - Classified fetch failures

pub mod errors;
pub mod provider;

pub use errors::RateSourceError;
pub use provider::dolar_api::{DolarApiProvider, DEFAULT_BASE_URL};
pub use provider::RateProvider;
