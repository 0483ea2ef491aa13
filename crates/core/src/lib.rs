//! Ratesync Core - Domain entities, services, and traits.
//!
//! This crate contains the exchange rate pipeline: the tolerant
//! transformer, the aggregator, the normalization rules and the service
//! that ties them to a rate provider and a repository. It is
//! database-agnostic and defines the repository trait implemented by the
//! `storage-sqlite` crate.

pub mod errors;
pub mod rates;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
