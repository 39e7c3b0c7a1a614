//! Upstream data sources for atlas.
//!
//! This crate knows how to talk to the two external endpoints the refresh
//! pipeline depends on:
//! - a country catalogue returning name, capital, region, population, flag and currencies
//! - an exchange-rate feed returning USD-relative rates keyed by currency code
//!
//! Each source issues exactly one request per call and never retries. Any
//! failure (transport, timeout, non-200 status, unreadable payload) is reported
//! as a [`SourceError`] carrying the endpoint that failed.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::SourceError;
pub use models::{RateTable, RawCountry, RawCurrency};
pub use provider::open_er_api::{OpenErApiSource, DEFAULT_RATES_URL};
pub use provider::rest_countries::{RestCountriesSource, DEFAULT_COUNTRIES_URL};
pub use provider::{CountrySource, RateSource, DEFAULT_FETCH_TIMEOUT};
