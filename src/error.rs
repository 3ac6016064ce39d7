//! Error taxonomy for the news client.
//!
//! Every fetch resolves to either a [`NewsPage`](crate::models::NewsPage) or
//! exactly one [`NewsError`]. Errors are scoped to the request that produced
//! them; nothing here is fatal to the process.

use thiserror::Error;

/// Failure of a single news request.
#[derive(Debug, Error)]
pub enum NewsError {
    /// The client is missing something it needs before any request is made
    /// (no API key, unusable base URL).
    #[error("{0}")]
    Configuration(String),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}")]
    Transport { status: u16 },

    /// The API answered 2xx but rejected the request in its envelope.
    #[error("{0}")]
    Upstream(String),

    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx body that is not a valid response envelope.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NewsError {
    pub(crate) fn missing_api_key() -> Self {
        NewsError::Configuration("News API key is not configured".to_string())
    }
}

impl From<reqwest::Error> for NewsError {
    fn from(e: reqwest::Error) -> Self {
        NewsError::Network(e.to_string())
    }
}
