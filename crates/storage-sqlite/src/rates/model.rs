//! Database models for exchange rates.
//!
//! Decimal columns are declared as (10, 2) and stored as text with exactly
//! two fractional digits.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use ratesync_core::errors::{DatabaseError, Error, Result};
use ratesync_core::rates::{round_half_up, PersistedRate, RateUpsert};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Total digits of a decimal column.
const DECIMAL_PRECISION: u32 = 10;
/// Fractional digits of a decimal column.
const DECIMAL_SCALE: u32 = 2;
/// Maximum length of the `type` column.
const TYPE_MAX_LENGTH: usize = 50;

/// Database model for exchange rates
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::exchange_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeRateDB {
    pub id: i32,
    pub rate_type: String,
    pub buy: String,
    pub sell: String,
    pub rate: String,
    pub diff: String,
    pub updated_at: NaiveDateTime,
}

/// Column values written by an upsert, for both the insert and update paths
#[derive(Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::exchange_rates)]
pub struct ExchangeRateChangesDB {
    pub rate_type: String,
    pub buy: String,
    pub sell: String,
    pub rate: String,
    pub diff: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<RateUpsert> for ExchangeRateChangesDB {
    type Error = Error;

    fn try_from(upsert: RateUpsert) -> Result<Self> {
        if upsert.rate_type.chars().count() > TYPE_MAX_LENGTH {
            return Err(Error::Database(DatabaseError::ConstraintViolation(format!(
                "type '{}' exceeds {} characters",
                upsert.rate_type, TYPE_MAX_LENGTH
            ))));
        }

        Ok(Self {
            buy: decimal_to_column(upsert.buy, "buy")?,
            sell: decimal_to_column(upsert.sell, "sell")?,
            rate: decimal_to_column(upsert.rate, "rate")?,
            diff: decimal_to_column(upsert.diff, "diff")?,
            rate_type: upsert.rate_type,
            updated_at: upsert.updated_at,
        })
    }
}

impl TryFrom<ExchangeRateDB> for PersistedRate {
    type Error = Error;

    fn try_from(db: ExchangeRateDB) -> Result<Self> {
        Ok(Self {
            id: db.id,
            buy: decimal_from_column(&db.buy, "buy")?,
            sell: decimal_from_column(&db.sell, "sell")?,
            rate: decimal_from_column(&db.rate, "rate")?,
            diff: decimal_from_column(&db.diff, "diff")?,
            rate_type: db.rate_type,
            updated_at: db.updated_at,
        })
    }
}

/// Quantizes `value` to the column scale and checks it fits the precision.
fn decimal_to_column(value: Decimal, column: &str) -> Result<String> {
    let mut quantized = round_half_up(value, DECIMAL_SCALE);
    let limit = Decimal::from(10_i64.pow(DECIMAL_PRECISION - DECIMAL_SCALE));
    if quantized.abs() >= limit {
        return Err(Error::Database(DatabaseError::ConstraintViolation(format!(
            "{} value {} does not fit NUMERIC({}, {})",
            column, value, DECIMAL_PRECISION, DECIMAL_SCALE
        ))));
    }
    quantized.rescale(DECIMAL_SCALE);
    Ok(quantized.to_string())
}

fn decimal_from_column(text: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(text).map_err(|e| {
        Error::Database(DatabaseError::Internal(format!(
            "Invalid {} value '{}' in exchange_rates: {}",
            column, text, e
        )))
    })
}
