//! REST Countries provider.
//!
//! Reads the v2 `all` endpoint restricted to the fields the pipeline uses:
//! name, capital, region, population, flag and currencies.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use super::{build_client, get_body, CountrySource};
use crate::errors::SourceError;
use crate::models::RawCountry;

const SOURCE_ID: &str = "REST_COUNTRIES";

/// Public endpoint used when no override is configured.
pub const DEFAULT_COUNTRIES_URL: &str =
    "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies";

pub struct RestCountriesSource {
    client: Client,
    url: String,
}

impl RestCountriesSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let url = url.into();
        Ok(Self {
            client: build_client(&url, timeout)?,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Decode a country catalogue body. A JSON `null` is an empty catalogue.
pub fn parse_countries(endpoint: &str, body: &[u8]) -> Result<Vec<RawCountry>, SourceError> {
    let countries: Option<Vec<RawCountry>> = serde_json::from_slice(body)
        .map_err(|e| SourceError::malformed(endpoint, e.to_string()))?;
    Ok(countries.unwrap_or_default())
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    fn id(&self) -> &'static str {
        SOURCE_ID
    }

    async fn fetch_countries(&self) -> Result<Vec<RawCountry>, SourceError> {
        let body = get_body(&self.client, &self.url).await?;
        let countries = parse_countries(&self.url, &body)?;
        debug!("{} returned {} countries", SOURCE_ID, countries.len());
        Ok(countries)
    }
}
