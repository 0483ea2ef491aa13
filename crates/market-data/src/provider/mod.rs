//! Rate provider abstraction and implementations.
//!
//! This module contains:
//! - The `RateProvider` trait that all providers implement
//! - The DolarAPI provider

mod traits;

pub mod dolar_api;

pub use traits::RateProvider;
