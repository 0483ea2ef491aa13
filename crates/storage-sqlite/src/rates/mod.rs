//! SQLite storage implementation for persisted exchange rates.

mod model;
mod repository;

pub use model::{ExchangeRateDB, ExchangeRateChangesDB};
pub use repository::RateRepository;
