//! HTTP client: configuration entry points and the request pipeline

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::config::HttpClientConfiguration;
use crate::error::HttpError;
use crate::headers::HeaderSource;
use crate::interceptor::{Interceptor, RequestOrResponse};
use crate::request::{json, resolve_url, HttpRequest, RequestInit};
use crate::response::HttpResponse;
use crate::transport::Transport;

/// HTTP client with merged default configuration and an ordered interceptor
/// pipeline
///
/// Cloning is cheap; clones share the transport and the active-request
/// counter, so concurrent calls across clones are tracked together.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    defaults: RequestInit,
    interceptors: Vec<Arc<dyn Interceptor>>,
    active_requests: Arc<AtomicUsize>,
    configured: bool,
}

impl HttpClient {
    /// Create a client using the default transport backend
    #[cfg(feature = "reqwest")]
    pub fn new() -> Self {
        Self::with_transport(Arc::new(crate::backends::ReqwestTransport::new()))
    }

    /// Create a client over the given transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: String::new(),
            defaults: RequestInit::default(),
            interceptors: Vec::new(),
            active_requests: Arc::new(AtomicUsize::new(0)),
            configured: false,
        }
    }

    /// Create a new client builder
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Whether any request is currently in flight
    pub fn is_requesting(&self) -> bool {
        self.active_request_count() > 0
    }

    /// Number of requests currently in flight through the pipeline
    pub fn active_request_count(&self) -> usize {
        self.active_requests.load(Ordering::SeqCst)
    }

    /// Whether `configure` has been applied to this client
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// The active base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The active default options
    pub fn defaults(&self) -> &RequestInit {
        &self.defaults
    }

    /// Configure the client through a callback
    ///
    /// The callback receives a configuration seeded with the client's current
    /// base URL, defaults and interceptors; whatever it returns replaces the
    /// active configuration wholesale.
    pub fn configure<F>(&mut self, configure: F) -> Result<(), HttpError>
    where
        F: FnOnce(HttpClientConfiguration) -> HttpClientConfiguration,
    {
        let seed = HttpClientConfiguration {
            base_url: self.base_url.clone(),
            defaults: self.defaults.clone(),
            interceptors: self.interceptors.clone(),
        };
        self.apply_configuration(configure(seed))
    }

    /// Configure the client from a plain default-options set
    ///
    /// Equivalent to a fresh configuration with an empty base URL and no
    /// interceptors.
    pub fn configure_defaults(&mut self, defaults: RequestInit) -> Result<(), HttpError> {
        self.apply_configuration(HttpClientConfiguration::new().with_defaults(defaults))
    }

    fn apply_configuration(&mut self, config: HttpClientConfiguration) -> Result<(), HttpError> {
        if config
            .defaults
            .headers
            .as_ref()
            .is_some_and(HeaderSource::is_opaque)
        {
            return Err(HttpError::Configuration(
                "Default headers must be a plain map so they can be enumerated; \
                 a prebuilt Headers collection is not accepted"
                    .to_string(),
            ));
        }

        self.base_url = config.base_url;
        self.defaults = config.defaults;
        self.interceptors = config.interceptors;
        self.configured = true;
        Ok(())
    }

    /// Issue a request for a target URL with optional per-call options
    pub async fn fetch(
        &self,
        target: &str,
        init: Option<RequestInit>,
    ) -> Result<HttpResponse, HttpError> {
        // Count before building so interceptors observe the requesting state
        let _guard = ActiveRequestGuard::new(Arc::clone(&self.active_requests));
        let request = self.build_request(target, init);
        self.run_pipeline(request).await
    }

    /// Issue a pre-built request through the same pipeline
    ///
    /// The request is reused as-is; only missing default headers are filled in.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let _guard = ActiveRequestGuard::new(Arc::clone(&self.active_requests));
        let mut request = request;
        self.apply_default_headers(&mut request);
        self.run_pipeline(request).await
    }

    /// GET a target URL
    pub async fn get(&self, target: &str) -> Result<HttpResponse, HttpError> {
        self.fetch(target, None).await
    }

    /// POST a JSON body to a target URL
    pub async fn post_json<B>(&self, target: &str, body: &B) -> Result<HttpResponse, HttpError>
    where
        B: Serialize + ?Sized,
    {
        let init = RequestInit::new()
            .with_method("POST")
            .with_body(json(Some(body))?);
        self.fetch(target, Some(init)).await
    }

    /// PUT a JSON body to a target URL
    pub async fn put_json<B>(&self, target: &str, body: &B) -> Result<HttpResponse, HttpError>
    where
        B: Serialize + ?Sized,
    {
        let init = RequestInit::new()
            .with_method("PUT")
            .with_body(json(Some(body))?);
        self.fetch(target, Some(init)).await
    }

    /// DELETE a target URL
    pub async fn delete(&self, target: &str) -> Result<HttpResponse, HttpError> {
        let init = RequestInit::new().with_method("DELETE");
        self.fetch(target, Some(init)).await
    }

    /// Build the concrete request for a target from stored defaults and
    /// per-call options, without sending it
    pub fn build_request(&self, target: &str, init: Option<RequestInit>) -> HttpRequest {
        let init = init.unwrap_or_default();
        let body_override = init.body.clone();

        // Merge order: defaults, empty headers placeholder, call-site options,
        // explicit body override. Default headers never flow through the
        // placeholder; they are filled in afterwards so call-site headers win.
        let mut base = self.defaults.clone();
        base.headers = Some(HeaderSource::default());
        let mut merged = base.overlaid_with(&init);
        if let Some(body) = body_override {
            merged.body = Some(body);
        }

        let headers = merged
            .headers
            .take()
            .map(|source| source.resolve())
            .unwrap_or_default();
        let url = resolve_url(&self.base_url, target);

        let mut request = HttpRequest::from_init(url, merged, headers);
        self.apply_default_headers(&mut request);
        request
    }

    fn apply_default_headers(&self, request: &mut HttpRequest) {
        // Parsed independently of the build merge so lazy values resolve once
        // per request
        let default_headers = self
            .defaults
            .headers
            .as_ref()
            .map(HeaderSource::resolve)
            .unwrap_or_default();

        // Content-Type is backfilled separately from the general fill below;
        // the precedence order is deliberate and load-bearing
        if !request.headers().has("content-type") {
            if let Some(content_type) = default_headers.get("content-type") {
                let content_type = content_type.to_string();
                request.headers_mut().set("Content-Type", content_type);
            }
        }

        for (name, value) in default_headers.iter() {
            if !request.headers().has(name) {
                request.headers_mut().set(name.to_string(), value.to_string());
            }
        }

        // A body that declares its own content type always wins
        let declared = request
            .body()
            .and_then(|body| body.content_type())
            .map(str::to_string);
        if let Some(content_type) = declared {
            request.headers_mut().set("Content-Type", content_type);
        }
    }

    async fn run_pipeline(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        tracing::debug!("{} {}", request.method(), request.url());
        let built = request.clone();

        // Request phase: fold interceptors in registration order. A response
        // returned by a handler is carried through untouched by the remaining
        // request handlers; errors feed the next failure handler, which may
        // recover.
        let mut outcome: Result<RequestOrResponse, HttpError> =
            Ok(RequestOrResponse::Request(request));
        for interceptor in &self.interceptors {
            outcome = match outcome {
                Ok(RequestOrResponse::Request(request)) => interceptor.request(request).await,
                short_circuited @ Ok(RequestOrResponse::Response(_)) => short_circuited,
                Err(error) => interceptor.request_error(error).await,
            };
        }

        // An unrecovered request-phase error bypasses the response phase
        let (current_request, result) = match outcome? {
            RequestOrResponse::Request(request) => {
                let result = self.transport.fetch(request.clone()).await;
                if let Err(error) = &result {
                    tracing::warn!("Transport error: {}", error);
                }
                (request, result)
            }
            // Short-circuited: the transport is never invoked and the built
            // request remains the current one
            RequestOrResponse::Response(response) => (built, Ok(response)),
        };

        self.process_response(result, &current_request).await
    }

    async fn process_response(
        &self,
        result: Result<HttpResponse, HttpError>,
        request: &HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        let mut outcome = result;
        for interceptor in &self.interceptors {
            outcome = match outcome {
                Ok(response) => interceptor.response(response, request).await,
                Err(error) => interceptor.response_error(error, request).await,
            };
        }
        outcome
    }
}

#[cfg(feature = "reqwest")]
impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("interceptors", &self.interceptors.len())
            .field("active_requests", &self.active_request_count())
            .field("configured", &self.configured)
            .finish()
    }
}

/// Builder for clients with a custom transport
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    transport: Option<Arc<dyn Transport>>,
}

impl HttpClientBuilder {
    /// Supply the transport performing the network exchange
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    ///
    /// Fails with [`HttpError::NoTransport`] when no transport was supplied
    /// and no default backend is available.
    pub fn build(self) -> Result<HttpClient, HttpError> {
        let transport = self
            .transport
            .or_else(default_transport)
            .ok_or(HttpError::NoTransport)?;
        Ok(HttpClient::with_transport(transport))
    }
}

fn default_transport() -> Option<Arc<dyn Transport>> {
    #[cfg(feature = "reqwest")]
    {
        Some(Arc::new(crate::backends::ReqwestTransport::new()))
    }
    #[cfg(not(feature = "reqwest"))]
    {
        None
    }
}

/// Increments the active-request counter on creation and decrements it when
/// the call settles, success or failure, without touching the outcome
#[derive(Debug)]
struct ActiveRequestGuard {
    counter: Arc<AtomicUsize>,
}

impl ActiveRequestGuard {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for ActiveRequestGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
