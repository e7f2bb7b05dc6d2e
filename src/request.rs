//! Request options, bodies and the built request type

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::HttpError;
use crate::headers::{HeaderSource, Headers};

/// Matches targets with an explicit `scheme://` or a protocol-relative `//`
static ABSOLUTE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-z][a-z0-9+\-.]*:)?//").expect("hardcoded pattern is valid")
});

/// Resolve a request target against a base URL
///
/// Absolute targets are used unchanged; anything else gets the base URL
/// prefixed verbatim, with no validation or normalization.
pub(crate) fn resolve_url(base_url: &str, target: &str) -> String {
    if ABSOLUTE_URL.is_match(target) {
        target.to_string()
    } else {
        format!("{base_url}{target}")
    }
}

/// Request body: raw bytes plus an optional declared content type
///
/// A declared content type wins over any Content-Type header on the request,
/// mirroring how blob bodies behave in fetch implementations.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

impl Body {
    /// Create a text body with no declared content type
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            bytes: text.into().into_bytes(),
            content_type: None,
        }
    }

    /// Create a binary body with no declared content type
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
        }
    }

    /// Create a binary body carrying its own declared content type
    pub fn bytes_with_type(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: Some(content_type.into()),
        }
    }

    /// The raw body bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The declared content type, if any
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

/// Serialize a value to a JSON body tagged `application/json`
///
/// `None` serializes as an empty object.
pub fn json<T>(value: Option<&T>) -> Result<Body, HttpError>
where
    T: Serialize + ?Sized,
{
    let bytes = match value {
        Some(value) => serde_json::to_vec(value)?,
        None => b"{}".to_vec(),
    };
    Ok(Body::bytes_with_type(bytes, "application/json"))
}

/// Serialize a value to a urlencoded form body
pub fn form<T>(value: &T) -> Result<Body, HttpError>
where
    T: Serialize + ?Sized,
{
    let encoded = serde_urlencoded::to_string(value)?;
    Ok(Body::bytes_with_type(
        encoded.into_bytes(),
        "application/x-www-form-urlencoded",
    ))
}

/// Request credentials mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    /// Never send credentials
    Omit,
    /// Send credentials for same-origin requests only
    SameOrigin,
    /// Always send credentials
    Include,
}

/// Optional request settings, used both as per-client defaults and per-call
/// overrides
///
/// Fields set on a per-call init win over defaults field-wise; headers follow
/// the dedicated merge rules in the client's build phase.
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    /// HTTP method; `GET` when unset
    pub method: Option<String>,
    /// Headers to apply
    pub headers: Option<HeaderSource>,
    /// Request body
    pub body: Option<Body>,
    /// Fetch request mode, stored verbatim
    pub mode: Option<String>,
    /// Credentials mode
    pub credentials: Option<Credentials>,
    /// Cache mode, stored verbatim
    pub cache: Option<String>,
    /// Redirect mode, stored verbatim
    pub redirect: Option<String>,
    /// Referrer, stored verbatim
    pub referrer: Option<String>,
    /// Subresource integrity value, stored verbatim
    pub integrity: Option<String>,
}

impl RequestInit {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the headers
    pub fn with_headers(mut self, headers: impl Into<HeaderSource>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    /// Set the body
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the request mode
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Set the credentials mode
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the cache mode
    pub fn with_cache(mut self, cache: impl Into<String>) -> Self {
        self.cache = Some(cache.into());
        self
    }

    /// Set the redirect mode
    pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }

    /// Set the referrer
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    /// Set the integrity value
    pub fn with_integrity(mut self, integrity: impl Into<String>) -> Self {
        self.integrity = Some(integrity.into());
        self
    }

    /// Overlay another option set on top of this one; set fields win
    pub(crate) fn overlaid_with(&self, overrides: &RequestInit) -> RequestInit {
        RequestInit {
            method: overrides.method.clone().or_else(|| self.method.clone()),
            headers: overrides.headers.clone().or_else(|| self.headers.clone()),
            body: overrides.body.clone().or_else(|| self.body.clone()),
            mode: overrides.mode.clone().or_else(|| self.mode.clone()),
            credentials: overrides.credentials.or(self.credentials),
            cache: overrides.cache.clone().or_else(|| self.cache.clone()),
            redirect: overrides.redirect.clone().or_else(|| self.redirect.clone()),
            referrer: overrides.referrer.clone().or_else(|| self.referrer.clone()),
            integrity: overrides
                .integrity
                .clone()
                .or_else(|| self.integrity.clone()),
        }
    }
}

/// A concrete, fully built request ready for the interceptor pipeline and the
/// transport
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: String,
    url: String,
    headers: Headers,
    body: Option<Body>,
    mode: Option<String>,
    credentials: Option<Credentials>,
    cache: Option<String>,
    redirect: Option<String>,
    referrer: Option<String>,
    integrity: Option<String>,
}

impl HttpRequest {
    /// Create a request with the given method and full URL
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Headers::new(),
            body: None,
            mode: None,
            credentials: None,
            cache: None,
            redirect: None,
            referrer: None,
            integrity: None,
        }
    }

    /// Build a request from a resolved URL and merged options
    pub(crate) fn from_init(url: String, init: RequestInit, headers: Headers) -> Self {
        Self {
            method: init.method.unwrap_or_else(|| "GET".to_string()),
            url,
            headers,
            body: init.body,
            mode: init.mode,
            credentials: init.credentials,
            cache: init.cache,
            redirect: init.redirect,
            referrer: init.referrer,
            integrity: init.integrity,
        }
    }

    /// Set the body, builder style
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a header, builder style
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// The HTTP method
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The full request URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Mutable access to the request headers
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// The request body, if any
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// The request mode, if set
    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    /// The credentials mode, if set
    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials
    }

    /// The cache mode, if set
    pub fn cache(&self) -> Option<&str> {
        self.cache.as_deref()
    }

    /// The redirect mode, if set
    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    /// The referrer, if set
    pub fn referrer(&self) -> Option<&str> {
        self.referrer.as_deref()
    }

    /// The integrity value, if set
    pub fn integrity(&self) -> Option<&str> {
        self.integrity.as_deref()
    }
}
