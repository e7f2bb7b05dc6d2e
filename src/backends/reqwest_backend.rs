//! reqwest-based transport implementation

use async_trait::async_trait;

use crate::error::HttpError;
use crate::headers::Headers;
use crate::request::HttpRequest;
use crate::response::HttpResponse;
use crate::transport::Transport;

/// Transport backed by a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with default client settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport from an existing `reqwest::Client`
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let method = reqwest::Method::from_bytes(request.method().as_bytes())
            .map_err(|e| HttpError::Other(format!("Invalid method: {e}")))?;

        let mut builder = self.inner.request(method, request.url());
        for (name, value) in request.headers().iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.as_bytes().to_vec());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.append(name.as_str(), value);
            }
        }

        let body = response.bytes().await?;
        Ok(HttpResponse::new(status)
            .with_headers(headers)
            .with_body_bytes(body.to_vec()))
    }
}
