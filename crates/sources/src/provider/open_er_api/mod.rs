//! Open Exchange Rates API (open.er-api.com) provider.
//!
//! The `latest/USD` endpoint returns every rate relative to one US dollar:
//!
//! ```text
//! { "result": "success", "base_code": "USD", "rates": { "USD": 1, "EUR": 0.92, ... } }
//! ```

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{build_client, get_body, RateSource};
use crate::errors::SourceError;
use crate::models::RateTable;

const SOURCE_ID: &str = "OPEN_ER_API";

/// Public endpoint used when no override is configured.
pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";

const RESULT_SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default, rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    rates: Option<RateTable>,
}

pub struct OpenErApiSource {
    client: Client,
    url: String,
}

impl OpenErApiSource {
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

/// Decode a `latest` response body into a rate table.
///
/// A `result` other than `"success"` or a missing `rates` object is a
/// malformed payload. When a currency code appears more than once the last
/// value wins.
pub fn parse_rates(endpoint: &str, body: &[u8]) -> Result<RateTable, SourceError> {
    let response: LatestRatesResponse = serde_json::from_slice(body)
        .map_err(|e| SourceError::malformed(endpoint, e.to_string()))?;

    match response.result.as_deref() {
        Some(RESULT_SUCCESS) => {}
        other => {
            let reason = response
                .error_type
                .or_else(|| other.map(str::to_string))
                .unwrap_or_else(|| "missing result".to_string());
            return Err(SourceError::malformed(
                endpoint,
                format!("unsuccessful response: {}", reason),
            ));
        }
    }

    response
        .rates
        .ok_or_else(|| SourceError::malformed(endpoint, "missing rates object"))
}

#[async_trait]
impl RateSource for OpenErApiSource {
    fn id(&self) -> &'static str {
        SOURCE_ID
    }

    async fn fetch_rates(&self) -> Result<RateTable, SourceError> {
        let body = get_body(&self.client, &self.url).await?;
        let rates = parse_rates(&self.url, &body)?;
        debug!("{} returned {} rates", SOURCE_ID, rates.len());
        Ok(rates)
    }
}
