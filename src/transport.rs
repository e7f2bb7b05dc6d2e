//! Transport trait: the single async call that performs the network exchange

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::HttpError;
use crate::request::HttpRequest;
use crate::response::HttpResponse;

/// Performs the actual request/response exchange
///
/// Everything above this trait is configuration and middleware; pooling,
/// retries, timeouts and TLS are the transport's concern.
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    /// Execute the request and return the response
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}
