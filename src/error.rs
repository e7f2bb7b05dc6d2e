//! HTTP error types

use thiserror::Error;

use crate::response::HttpResponse;

/// Errors that can occur while configuring the client or running a request
#[derive(Debug, Error)]
pub enum HttpError {
    /// No transport is available to perform requests
    #[error("No HTTP transport available. Enable a backend feature or supply one with `HttpClientBuilder::transport`")]
    NoTransport,
    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Response completed with a non-success status
    ///
    /// Produced by [`RejectErrorResponses`](crate::RejectErrorResponses); the
    /// full response is carried so failure handlers can recover it.
    #[error("HTTP error ({})", .0.status())]
    Status(Box<HttpResponse>),
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
    /// Body encode or response decode error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Serialization(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for HttpError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        HttpError::Serialization(err.to_string())
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            HttpError::Connection(err.to_string())
        } else if err.is_decode() {
            HttpError::Serialization(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }
}
