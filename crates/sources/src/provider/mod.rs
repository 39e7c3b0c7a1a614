//! Source traits and the concrete HTTP providers.

pub mod open_er_api;
pub mod rest_countries;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::errors::SourceError;
use crate::models::{RateTable, RawCountry};

/// A source of country reference data.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Short identifier used in logs, e.g. "REST_COUNTRIES".
    fn id(&self) -> &'static str;

    /// Fetch the full country catalogue with one request.
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>, SourceError>;
}

/// A source of USD-relative exchange rates.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Short identifier used in logs, e.g. "OPEN_ER_API".
    fn id(&self) -> &'static str;

    /// Fetch the current rate table with one request.
    async fn fetch_rates(&self) -> Result<RateTable, SourceError>;
}

/// Default timeout applied to every upstream call.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the HTTP client for one endpoint. Every request it sends is bounded
/// by `timeout`; a client that cannot be built is reported, never replaced by
/// one without a timeout.
pub(crate) fn build_client(endpoint: &str, timeout: Duration) -> Result<Client, SourceError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SourceError::Transport {
            endpoint: endpoint.to_string(),
            message: format!("failed to build HTTP client: {}", e),
        })
}

/// Issue a single GET and return the raw body.
///
/// Anything but HTTP 200 is a [`SourceError::Status`].
pub(crate) async fn get_body(client: &Client, endpoint: &str) -> Result<Vec<u8>, SourceError> {
    let response = client
        .get(endpoint)
        .send()
        .await
        .map_err(|e| SourceError::from_reqwest(endpoint, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(SourceError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| SourceError::from_reqwest(endpoint, e))?;

    Ok(body.to_vec())
}
