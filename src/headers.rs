//! Header collection and header-source types
//!
//! Two header representations exist: a plain enumerable mapping whose values
//! may be lazy (resolved per request), and a pre-built [`Headers`] collection.
//! Default headers must be the enumerable kind because the merge logic walks
//! their entries; [`HeaderSource`] carries that distinction as an explicit tag.

use std::fmt;
use std::sync::Arc;

/// Ordered header collection with case-insensitive name lookup
///
/// The spelling of a name is preserved from the first call that set it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty header collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the first value for a header name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a header name is present (case-insensitive)
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a header, replacing any existing values for the name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.entries.push((name, value.into()));
    }

    /// Append a header value without removing existing ones
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Remove all values for a header name (case-insensitive)
    pub fn delete(&mut self, name: &str) {
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    /// Iterate over `(name, value)` entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of header entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A header value: either a fixed string or a callable resolved per request
#[derive(Clone)]
pub enum HeaderValue {
    /// Fixed value
    Static(String),
    /// Callable invoked each time a request is built
    Lazy(Arc<dyn Fn() -> String + Send + Sync>),
}

impl HeaderValue {
    /// Create a lazy value from a callable
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        HeaderValue::Lazy(Arc::new(f))
    }

    /// Resolve to a concrete string, invoking the callable if lazy
    pub fn resolve(&self) -> String {
        match self {
            HeaderValue::Static(value) => value.clone(),
            HeaderValue::Lazy(f) => f(),
        }
    }
}

impl fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Static(value) => f.debug_tuple("Static").field(value).finish(),
            HeaderValue::Lazy(_) => f.debug_tuple("Lazy").field(&"..").finish(),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Static(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Static(value)
    }
}

/// Header input for default and per-call options
#[derive(Debug, Clone)]
pub enum HeaderSource {
    /// Enumerable name-to-value mapping, possibly with lazy values
    Map(Vec<(String, HeaderValue)>),
    /// Pre-built collection; rejected as *default* headers at configure time
    Opaque(Headers),
}

impl HeaderSource {
    /// Build an enumerable mapping from `(name, value)` pairs
    pub fn map<I, N, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<HeaderValue>,
    {
        HeaderSource::Map(
            entries
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }

    /// Whether this source is a pre-built collection
    pub fn is_opaque(&self) -> bool {
        matches!(self, HeaderSource::Opaque(_))
    }

    /// Resolve into a concrete [`Headers`] snapshot, invoking lazy values
    pub fn resolve(&self) -> Headers {
        match self {
            HeaderSource::Map(entries) => {
                let mut headers = Headers::new();
                for (name, value) in entries {
                    headers.append(name.clone(), value.resolve());
                }
                headers
            }
            HeaderSource::Opaque(headers) => headers.clone(),
        }
    }
}

impl Default for HeaderSource {
    fn default() -> Self {
        HeaderSource::Map(Vec::new())
    }
}

impl From<Headers> for HeaderSource {
    fn from(headers: Headers) -> Self {
        HeaderSource::Opaque(headers)
    }
}
