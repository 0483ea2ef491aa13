use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One named quote with buy/sell prices, as exposed on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Rate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "compra")]
    pub buy: Decimal,
    #[serde(rename = "venta")]
    pub sell: Decimal,
    #[serde(rename = "fechaActualizacion")]
    pub updated_at: String,
}

impl Rate {
    /// Midpoint between buy and sell.
    pub fn midpoint(&self) -> Decimal {
        (self.buy + self.sell) / Decimal::TWO
    }
}

/// Cross-rate mean of buy and sell prices, rounded to 2 places.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Average {
    #[serde(rename = "compra")]
    pub buy: Decimal,
    #[serde(rename = "venta")]
    pub sell: Decimal,
}

impl Average {
    pub const ZERO: Average = Average {
        buy: Decimal::ZERO,
        sell: Decimal::ZERO,
    };

    pub fn midpoint(&self) -> Decimal {
        (self.buy + self.sell) / Decimal::TWO
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RatesResponse {
    pub rates: Vec<Rate>,
    pub average: Average,
}

/// Durable record of the latest normalized values for one rate type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRate {
    pub id: i32,
    #[serde(rename = "type")]
    pub rate_type: String,
    pub buy: Decimal,
    pub sell: Decimal,
    pub rate: Decimal,
    pub diff: Decimal,
    pub updated_at: NaiveDateTime,
}

/// Input of a repository upsert keyed by `rate_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateUpsert {
    pub rate_type: String,
    pub buy: Decimal,
    pub sell: Decimal,
    pub rate: Decimal,
    pub diff: Decimal,
    pub updated_at: NaiveDateTime,
}
