//! Database models for countries.

use atlas_core::constants::DECIMAL_PRECISION;
use atlas_core::countries::{Country, MergedCountry};
use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use log::warn;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Database model for a stored country row
#[derive(Queryable, QueryableByName, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::countries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CountryDB {
    pub id: i32,
    pub name: String,
    pub capital: String,
    pub region: String,
    pub population: i64,
    pub flag: String,
    pub currency: Option<String>,
    pub rate: Option<String>,
    pub estimated_gdp: Option<String>,
    pub last_refreshed_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert model; `id` and `updated_at` are assigned by SQLite
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::countries)]
pub struct NewCountryDB {
    pub name: String,
    pub capital: String,
    pub region: String,
    pub population: i64,
    pub flag: String,
    pub currency: Option<String>,
    pub rate: Option<String>,
    pub estimated_gdp: Option<String>,
    pub last_refreshed_at: NaiveDateTime,
}

fn decimal_to_column(value: Option<Decimal>) -> Option<String> {
    value.map(|d| d.round_dp(DECIMAL_PRECISION).to_string())
}

fn column_to_decimal(value: Option<&str>) -> Option<Decimal> {
    value.and_then(|raw| match Decimal::from_str(raw) {
        Ok(d) => Some(d),
        Err(e) => {
            warn!("Ignoring unparseable decimal column value '{}': {}", raw, e);
            None
        }
    })
}

impl NewCountryDB {
    pub fn from_merged(country: MergedCountry, refreshed_at: NaiveDateTime) -> Self {
        Self {
            name: country.name,
            capital: country.capital,
            region: country.region,
            population: country.population,
            flag: country.flag,
            currency: country.currency,
            rate: decimal_to_column(country.rate),
            estimated_gdp: decimal_to_column(country.estimated_gdp),
            last_refreshed_at: refreshed_at,
        }
    }
}

// Conversion to domain model
impl From<CountryDB> for Country {
    fn from(db: CountryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            capital: db.capital,
            region: db.region,
            population: db.population,
            flag: db.flag,
            currency: db.currency,
            rate: column_to_decimal(db.rate.as_deref()),
            estimated_gdp: column_to_decimal(db.estimated_gdp.as_deref()),
            last_refreshed_at: Utc.from_utc_datetime(&db.last_refreshed_at),
        }
    }
}
