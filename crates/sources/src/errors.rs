//! Error type for upstream source calls.

use thiserror::Error;

/// Errors returned by a country or rate source.
///
/// Every variant means the source is unavailable for this refresh. They are
/// kept apart so logs and API responses can say *why* the endpoint failed,
/// but callers treat them uniformly: the refresh aborts and stored data is
/// left untouched.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The endpoint answered with something other than HTTP 200.
    #[error("Source unavailable: {endpoint} returned HTTP {status}")]
    Status {
        /// The endpoint that was called
        endpoint: String,
        /// The HTTP status code received
        status: u16,
    },

    /// The request did not complete within the configured timeout.
    #[error("Source unavailable: {endpoint} timed out")]
    Timeout {
        /// The endpoint that was called
        endpoint: String,
    },

    /// Connection, TLS or other transport-level failure.
    #[error("Source unavailable: {endpoint} - {message}")]
    Transport {
        /// The endpoint that was called
        endpoint: String,
        /// The underlying transport error
        message: String,
    },

    /// The endpoint answered 200 but the body could not be understood.
    #[error("Source unavailable: {endpoint} returned a malformed payload - {message}")]
    MalformedPayload {
        /// The endpoint that was called
        endpoint: String,
        /// What was wrong with the payload
        message: String,
    },
}

impl SourceError {
    /// The endpoint identity carried by every variant.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Status { endpoint, .. }
            | Self::Timeout { endpoint }
            | Self::Transport { endpoint, .. }
            | Self::MalformedPayload { endpoint, .. } => endpoint,
        }
    }

    /// Classify a `reqwest` failure for the given endpoint.
    pub(crate) fn from_reqwest(endpoint: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else if err.is_decode() {
            Self::MalformedPayload {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        }
    }

    pub(crate) fn malformed(endpoint: &str, message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }
}
