use rust_decimal::Decimal;

use super::normalization::round_half_up;
use super::rates_model::{Average, Rate};

/// Arithmetic mean of buy and sell prices, each rounded half-up to 2 places.
///
/// An empty slice averages to `0.0 / 0.0`.
pub fn average(rates: &[Rate]) -> Average {
    if rates.is_empty() {
        return Average::ZERO;
    }

    let count = Decimal::from(rates.len());
    let (total_buy, total_sell) = rates
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(buy, sell), rate| {
            (buy + rate.buy, sell + rate.sell)
        });

    Average {
        buy: round_half_up(total_buy / count, 2),
        sell: round_half_up(total_sell / count, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(buy: Decimal, sell: Decimal) -> Rate {
        Rate {
            name: "X".to_string(),
            buy,
            sell,
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_empty_average_is_zero() {
        let avg = average(&[]);
        assert_eq!(avg.buy, Decimal::ZERO);
        assert_eq!(avg.sell, Decimal::ZERO);
    }

    #[test]
    fn test_sample_average() {
        let rates = vec![
            rate(dec!(950), dec!(990)),
            rate(dec!(1100), dec!(1120)),
            rate(dec!(1050), dec!(1070)),
        ];

        let avg = average(&rates);

        assert_eq!(avg.buy, dec!(1033.33));
        assert_eq!(avg.sell, dec!(1060.0));
    }

    #[test]
    fn test_single_rate_is_its_own_average() {
        let avg = average(&[rate(dec!(12.345), dec!(0))]);
        assert_eq!(avg.buy, dec!(12.35));
        assert_eq!(avg.sell, Decimal::ZERO);
    }

    #[test]
    fn test_average_rounds_half_up() {
        // mean buy = 0.125, mean sell = 0.135
        let rates = vec![rate(dec!(0.10), dec!(0.12)), rate(dec!(0.15), dec!(0.15))];

        let avg = average(&rates);

        assert_eq!(avg.buy, dec!(0.13));
        assert_eq!(avg.sell, dec!(0.14));
    }

    #[test]
    fn test_average_matches_rounded_mean_for_various_lists() {
        let lists: Vec<Vec<Rate>> = vec![
            vec![rate(dec!(1), dec!(2)), rate(dec!(2), dec!(3))],
            vec![rate(dec!(100.1), dec!(100.2)); 7],
            vec![
                rate(dec!(1), dec!(1)),
                rate(dec!(1), dec!(1)),
                rate(dec!(2), dec!(2)),
            ],
        ];

        for rates in lists {
            let n = Decimal::from(rates.len());
            let mean_buy: Decimal = rates.iter().map(|r| r.buy).sum::<Decimal>() / n;
            let mean_sell: Decimal = rates.iter().map(|r| r.sell).sum::<Decimal>() / n;

            let avg = average(&rates);

            assert_eq!(avg.buy, round_half_up(mean_buy, 2));
            assert_eq!(avg.sell, round_half_up(mean_sell, 2));
        }
    }
}
