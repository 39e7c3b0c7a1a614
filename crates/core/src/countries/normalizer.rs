//! Turns raw catalogue entries into [`NormalizedCountry`] records.
//!
//! Normalization never fails. Missing or unusable fields fall back to a
//! default so one bad entry cannot reject the whole import.

use atlas_sources::RawCountry;

use super::countries_model::NormalizedCountry;
use crate::constants::UNKNOWN_COUNTRY_NAME;

impl From<RawCountry> for NormalizedCountry {
    fn from(raw: RawCountry) -> Self {
        let currency = raw.primary_currency_code().map(str::to_string);

        let name = raw
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_COUNTRY_NAME.to_string());

        Self {
            name,
            capital: raw.capital.unwrap_or_default(),
            region: raw.region.unwrap_or_default(),
            population: raw.population.filter(|p| *p >= 0).unwrap_or(0),
            flag: raw.flag.unwrap_or_default(),
            currency,
        }
    }
}

/// Normalize a catalogue, preserving input order.
pub fn normalize_countries(raw: Vec<RawCountry>) -> Vec<NormalizedCountry> {
    raw.into_iter().map(NormalizedCountry::from).collect()
}
