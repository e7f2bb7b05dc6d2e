//! Client configuration builder

use std::fmt;
use std::sync::Arc;

use crate::interceptor::{Interceptor, RejectErrorResponses};
use crate::request::{Credentials, RequestInit};

/// Accumulates a base URL, default request options and an ordered interceptor
/// list
///
/// All operations are chainable. The interceptor list is append-only; there is
/// no removal or reordering.
#[derive(Clone, Default)]
pub struct HttpClientConfiguration {
    pub(crate) base_url: String,
    pub(crate) defaults: RequestInit,
    pub(crate) interceptors: Vec<Arc<dyn Interceptor>>,
}

impl HttpClientConfiguration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL prefixed to relative request targets
    ///
    /// The string is not validated; a malformed URL surfaces as a transport
    /// failure.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the default request options merged into every request
    pub fn with_defaults(mut self, defaults: RequestInit) -> Self {
        self.defaults = defaults;
        self
    }

    /// Append an interceptor to the pipeline
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Apply the standard preset: same-origin credentials plus rejection of
    /// non-success responses
    ///
    /// A caller-supplied credentials default is left untouched.
    pub fn use_standard_configuration(mut self) -> Self {
        if self.defaults.credentials.is_none() {
            self.defaults.credentials = Some(Credentials::SameOrigin);
        }
        self.reject_error_responses()
    }

    /// Append an interceptor that turns non-2xx responses into errors
    pub fn reject_error_responses(self) -> Self {
        self.with_interceptor(Arc::new(RejectErrorResponses))
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured default options
    pub fn defaults(&self) -> &RequestInit {
        &self.defaults
    }

    /// Number of registered interceptors
    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }
}

impl fmt::Debug for HttpClientConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClientConfiguration")
            .field("base_url", &self.base_url)
            .field("defaults", &self.defaults)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}
