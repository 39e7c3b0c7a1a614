//! Currency join and GDP estimate.

use atlas_sources::RateTable;
use rand::Rng;
use rust_decimal::Decimal;
use std::fmt;

use super::countries_model::{MergedCountry, NormalizedCountry};
use crate::constants::{GDP_MULTIPLIER_MAX, GDP_MULTIPLIER_MIN};
use crate::errors::{Error, Result};

/// Multiplier in `[1000, 2000]` applied to every GDP estimate of one refresh.
///
/// Drawn once per refresh so that, within a refresh, `estimated_gdp` is
/// proportional to `population / rate` across all rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GdpMultiplier(u32);

impl GdpMultiplier {
    pub fn new(value: u32) -> Result<Self> {
        if (GDP_MULTIPLIER_MIN..=GDP_MULTIPLIER_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidMultiplier(value))
        }
    }

    /// Uniform draw from the allowed range.
    pub fn draw() -> Self {
        Self::draw_with(&mut rand::thread_rng())
    }

    pub fn draw_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(GDP_MULTIPLIER_MIN..=GDP_MULTIPLIER_MAX))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GdpMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `population * multiplier / rate`, or `None` when the rate is zero or the
/// arithmetic would overflow.
pub fn estimate_gdp(population: i64, multiplier: GdpMultiplier, rate: Decimal) -> Option<Decimal> {
    Decimal::from(population)
        .checked_mul(Decimal::from(multiplier.value()))?
        .checked_div(rate)
}

/// Left-join each country with its currency's rate.
///
/// Countries without a currency, or whose currency has no rate, keep
/// `rate` and `estimated_gdp` as `None`. Output order matches input order.
pub fn merge_countries(
    countries: &[NormalizedCountry],
    rates: &RateTable,
    multiplier: GdpMultiplier,
) -> Vec<MergedCountry> {
    countries
        .iter()
        .map(|country| {
            let rate = country
                .currency
                .as_ref()
                .and_then(|code| rates.get(code))
                .copied();
            let estimated_gdp = rate.and_then(|r| estimate_gdp(country.population, multiplier, r));

            MergedCountry {
                name: country.name.clone(),
                capital: country.capital.clone(),
                region: country.region.clone(),
                population: country.population,
                flag: country.flag.clone(),
                currency: country.currency.clone(),
                rate,
                estimated_gdp,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn country(name: &str, population: i64, currency: Option<&str>) -> NormalizedCountry {
        NormalizedCountry {
            name: name.to_string(),
            capital: String::new(),
            region: String::new(),
            population,
            flag: String::new(),
            currency: currency.map(str::to_string),
        }
    }

    fn rates(entries: &[(&str, Decimal)]) -> RateTable {
        entries
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect()
    }

    #[test]
    fn test_testland_estimate() {
        let merged = merge_countries(
            &[country("Testland", 1000, Some("TST"))],
            &rates(&[("TST", dec!(2.0))]),
            GdpMultiplier::new(1500).unwrap(),
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].rate, Some(dec!(2.0)));
        assert_eq!(merged[0].estimated_gdp, Some(dec!(750000)));
    }

    #[test]
    fn test_unmatched_currency_has_no_rate_or_estimate() {
        let merged = merge_countries(
            &[
                country("Nowhere", 500, Some("XXX")),
                country("Antarctica", 1000, None),
            ],
            &rates(&[("EUR", dec!(0.92))]),
            GdpMultiplier::new(1000).unwrap(),
        );

        for row in &merged {
            assert_eq!(row.rate, None);
            assert_eq!(row.estimated_gdp, None);
        }
    }

    #[test]
    fn test_zero_rate_yields_no_estimate() {
        let merged = merge_countries(
            &[country("Zeroland", 1000, Some("ZRO"))],
            &rates(&[("ZRO", Decimal::ZERO)]),
            GdpMultiplier::new(1200).unwrap(),
        );

        assert_eq!(merged[0].rate, Some(Decimal::ZERO));
        assert_eq!(merged[0].estimated_gdp, None);
    }

    #[test]
    fn test_overflow_yields_no_estimate() {
        assert_eq!(
            estimate_gdp(i64::MAX, GdpMultiplier::new(2000).unwrap(), dec!(0.0000000001)),
            None
        );
    }

    #[test]
    fn test_multiplier_bounds() {
        assert!(GdpMultiplier::new(999).is_err());
        assert!(GdpMultiplier::new(1000).is_ok());
        assert!(GdpMultiplier::new(2000).is_ok());
        assert!(GdpMultiplier::new(2001).is_err());
    }

    #[test]
    fn test_draw_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let value = GdpMultiplier::draw_with(&mut rng).value();
            assert!((1000..=2000).contains(&value));
        }
    }

    #[test]
    fn test_one_multiplier_for_all_rows() {
        let merged = merge_countries(
            &[
                country("A", 1000, Some("AAA")),
                country("B", 4000, Some("BBB")),
            ],
            &rates(&[("AAA", dec!(1)), ("BBB", dec!(2))]),
            GdpMultiplier::draw(),
        );

        // gdp / (population / rate) is the multiplier, identical across rows
        let a = merged[0].estimated_gdp.unwrap() / dec!(1000);
        let b = merged[1].estimated_gdp.unwrap() / (dec!(4000) / dec!(2));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_merge_is_idempotent(
            populations in proptest::collection::vec(0i64..2_000_000_000, 0..20),
            multiplier in 1000u32..=2000,
        ) {
            let countries: Vec<_> = populations
                .iter()
                .enumerate()
                .map(|(i, p)| country(&format!("C{}", i), *p, Some(if i % 3 == 0 { "NOPE" } else { "EUR" })))
                .collect();
            let table = rates(&[("EUR", dec!(0.92))]);
            let multiplier = GdpMultiplier::new(multiplier).unwrap();

            let first = merge_countries(&countries, &table, multiplier);
            let second = merge_countries(&countries, &table, multiplier);
            prop_assert_eq!(&first, &second);

            for (row, input) in first.iter().zip(&countries) {
                prop_assert_eq!(&row.name, &input.name);
                prop_assert_eq!(row.estimated_gdp.is_some(), row.rate.is_some());
            }
        }
    }
}
