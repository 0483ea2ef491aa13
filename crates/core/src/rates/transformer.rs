//! Tolerant decoding of raw provider records into [`Rate`]s.
//!
//! Missing, `null` or mistyped fields map to documented defaults so later
//! stages never see partial data:
//!
//! | Field                | Source key            | Default |
//! |----------------------|-----------------------|---------|
//! | `name`               | `nombre`              | `""`    |
//! | `buy`                | `compra`              | `0`     |
//! | `sell`               | `venta`               | `0`     |
//! | `updated_at`         | `fechaActualizacion`  | `""`    |
//!
//! Prices may be JSON numbers or numeric strings. Negative prices and
//! prices of 1e8 or more (beyond a NUMERIC(10, 2) column) are treated as
//! mistyped.

use log::warn;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use super::rates_model::Rate;
use crate::errors::{Error, Result};

const NAME_KEY: &str = "nombre";
const BUY_KEY: &str = "compra";
const SELL_KEY: &str = "venta";
const UPDATED_AT_KEY: &str = "fechaActualizacion";

/// Exclusive upper bound of a price. Keeps sums and midpoints far from
/// `Decimal::MAX`.
const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Maps the raw payload into rates, preserving order and duplicates.
///
/// Fails with [`Error::InvalidData`] when the payload is not an array or
/// one of its elements is not an object.
pub fn transform(raw: &Value) -> Result<Vec<Rate>> {
    let records = raw.as_array().ok_or_else(|| {
        Error::InvalidData(format!(
            "expected a JSON array of rates, got {}",
            json_kind(raw)
        ))
    })?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let fields = record.as_object().ok_or_else(|| {
                Error::InvalidData(format!(
                    "rate record {} is {}, expected an object",
                    index,
                    json_kind(record)
                ))
            })?;
            Ok(Rate {
                name: text_field(fields, NAME_KEY),
                buy: price_field(fields, BUY_KEY),
                sell: price_field(fields, SELL_KEY),
                updated_at: text_field(fields, UPDATED_AT_KEY),
            })
        })
        .collect()
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn price_field(fields: &Map<String, Value>, key: &str) -> Decimal {
    let parsed = match fields.get(key) {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    };

    match parsed {
        Some(value) if value.is_sign_negative() && !value.is_zero() => {
            warn!("Ignoring negative '{}' price {}", key, value);
            Decimal::ZERO
        }
        Some(value) if value >= PRICE_LIMIT => {
            warn!("Ignoring out of range '{}' price {}", key, value);
            Decimal::ZERO
        }
        Some(value) => value,
        None => Decimal::ZERO,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_transform_maps_fields() {
        let raw = json!([
            {"moneda": "USD", "casa": "oficial", "nombre": "Oficial", "compra": 950.0, "venta": 990.5, "fechaActualizacion": "2025-11-13T10:00:00.000Z"}
        ]);

        let rates = transform(&raw).unwrap();

        assert_eq!(
            rates,
            vec![Rate {
                name: "Oficial".to_string(),
                buy: dec!(950.0),
                sell: dec!(990.5),
                updated_at: "2025-11-13T10:00:00.000Z".to_string(),
            }]
        );
    }

    #[test]
    fn test_transform_defaults_missing_fields() {
        let raw = json!([{}]);

        let rates = transform(&raw).unwrap();

        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].name, "");
        assert_eq!(rates[0].buy, Decimal::ZERO);
        assert_eq!(rates[0].sell, Decimal::ZERO);
        assert_eq!(rates[0].updated_at, "");
    }

    #[test]
    fn test_transform_defaults_mistyped_and_null_fields() {
        let raw = json!([
            {"nombre": 42, "compra": null, "venta": true, "fechaActualizacion": ["x"]}
        ]);

        let rates = transform(&raw).unwrap();

        assert_eq!(rates[0].name, "");
        assert_eq!(rates[0].buy, Decimal::ZERO);
        assert_eq!(rates[0].sell, Decimal::ZERO);
        assert_eq!(rates[0].updated_at, "");
    }

    #[test]
    fn test_transform_accepts_numeric_strings_and_integers() {
        let raw = json!([{"nombre": "Blue", "compra": "1100.25", "venta": 1120}]);

        let rates = transform(&raw).unwrap();

        assert_eq!(rates[0].buy, dec!(1100.25));
        assert_eq!(rates[0].sell, dec!(1120));
    }

    #[test]
    fn test_transform_rejects_negative_prices() {
        let raw = json!([{"nombre": "Cripto", "compra": -5.0, "venta": "abc"}]);

        let rates = transform(&raw).unwrap();

        assert_eq!(rates[0].buy, Decimal::ZERO);
        assert_eq!(rates[0].sell, Decimal::ZERO);
    }

    #[test]
    fn test_transform_defaults_out_of_range_prices() {
        let raw = json!([
            {"nombre": "A", "compra": 7.9e28, "venta": 1},
            {"nombre": "B", "compra": "79000000000000000000000000000", "venta": 99999999.99}
        ]);

        let rates = transform(&raw).unwrap();

        assert_eq!(rates[0].buy, Decimal::ZERO);
        assert_eq!(rates[1].buy, Decimal::ZERO);
        assert_eq!(rates[1].sell, dec!(99999999.99));

        // Downstream arithmetic stays in range.
        let avg = crate::rates::average(&rates);
        assert_eq!(avg.buy, Decimal::ZERO);
        assert!(rates.iter().all(|r| r.midpoint() < PRICE_LIMIT));
    }

    #[test]
    fn test_transform_preserves_order_and_duplicates() {
        let raw = json!([
            {"nombre": "Blue", "compra": 1.0, "venta": 2.0},
            {"nombre": "Oficial", "compra": 3.0, "venta": 4.0},
            {"nombre": "Blue", "compra": 5.0, "venta": 6.0}
        ]);

        let rates = transform(&raw).unwrap();

        let names: Vec<&str> = rates.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Blue", "Oficial", "Blue"]);
        assert_eq!(rates[2].buy, dec!(5.0));
    }

    #[test]
    fn test_transform_empty_array() {
        assert!(transform(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_transform_rejects_non_array_payload() {
        let err = transform(&json!({"nombre": "Oficial"})).unwrap_err();
        assert!(matches!(err, Error::InvalidData(ref msg) if msg.contains("an object")));
    }

    #[test]
    fn test_transform_rejects_non_object_record() {
        let err = transform(&json!([{"nombre": "Oficial"}, "Blue"])).unwrap_err();
        assert!(matches!(err, Error::InvalidData(ref msg) if msg.contains("record 1")));
    }
}
