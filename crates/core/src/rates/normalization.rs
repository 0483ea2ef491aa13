//! Normalization rules applied before persisting a rate.

use rust_decimal::{Decimal, RoundingStrategy};

use super::rates_model::{Average, Rate};

/// Rounds half away from zero, i.e. half-up for the non-negative prices.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Derives the storage key of a rate name: lower-cased, spaces replaced
/// with underscores. `"Dólar Blue"` becomes `"dólar_blue"`.
///
/// Distinct names may collapse to the same key ("Blue" and "blue"); such
/// rates share one stored record.
pub fn normalize_rate_type(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Returns `(rate, diff)` for `rate` against the cross-rate `average`.
///
/// `rate` is the midpoint price as a ratio of the average midpoint, rounded
/// to 4 places, or zero when the average midpoint is not positive. `diff` is
/// the midpoint deviation from the average midpoint, rounded to 2 places.
pub fn normalized_metrics(rate: &Rate, average: &Average) -> (Decimal, Decimal) {
    let current_price = rate.midpoint();
    let avg_price = average.midpoint();

    let normalized_rate = if avg_price > Decimal::ZERO {
        round_half_up(current_price / avg_price, 4)
    } else {
        Decimal::ZERO
    };
    let diff = round_half_up(current_price - avg_price, 2);

    (normalized_rate, diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(name: &str, buy: Decimal, sell: Decimal) -> Rate {
        Rate {
            name: name.to_string(),
            buy,
            sell,
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_normalize_rate_type() {
        assert_eq!(normalize_rate_type("Oficial"), "oficial");
        assert_eq!(normalize_rate_type("Dólar Blue"), "dólar_blue");
        assert_eq!(
            normalize_rate_type("Contado con liquidación"),
            "contado_con_liquidación"
        );
        assert_eq!(normalize_rate_type(""), "");
    }

    #[test]
    fn test_normalize_rate_type_collisions() {
        assert_eq!(normalize_rate_type("Blue"), normalize_rate_type("BLUE"));
        assert_eq!(normalize_rate_type("a b"), normalize_rate_type("A_B"));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(dec!(1033.335), 2), dec!(1033.34));
        assert_eq!(round_half_up(dec!(1033.334), 2), dec!(1033.33));
        assert_eq!(round_half_up(dec!(0.125), 2), dec!(0.13));
        assert_eq!(round_half_up(dec!(-76.665), 2), dec!(-76.67));
    }

    #[test]
    fn test_metrics_above_and_below_average() {
        let average = Average {
            buy: dec!(1033.33),
            sell: dec!(1060.00),
        };

        let (blue_rate, blue_diff) = normalized_metrics(&rate("Blue", dec!(1100), dec!(1120)), &average);
        assert_eq!(blue_rate, dec!(1.0605));
        assert_eq!(blue_diff, dec!(63.34));
        assert!(blue_rate > Decimal::ONE);

        let (oficial_rate, oficial_diff) =
            normalized_metrics(&rate("Oficial", dec!(950), dec!(990)), &average);
        assert_eq!(oficial_rate, dec!(0.9268));
        assert_eq!(oficial_diff, dec!(-76.67));
        assert!(oficial_rate < Decimal::ONE);
    }

    #[test]
    fn test_metrics_with_zero_average() {
        let (normalized, diff) =
            normalized_metrics(&rate("Blue", dec!(10), dec!(20)), &Average::ZERO);
        assert_eq!(normalized, Decimal::ZERO);
        assert_eq!(diff, dec!(15));
    }
}
