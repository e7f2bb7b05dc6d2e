//! Configurable HTTP client over a pluggable transport
//!
//! This crate wraps a fetch-style transport with merged default configuration
//! (base URL, default headers and options) and an ordered chain of
//! request/response interceptors that can transform, short-circuit or reject
//! in-flight requests and responses. The transport itself is supplied
//! externally; the default `reqwest` backend can be disabled to bring your
//! own.
//!
//! # Example
//!
//! ```no_run
//! use fetch_client::{HeaderSource, HttpClient, HttpError, RequestInit};
//!
//! async fn example() -> Result<(), HttpError> {
//!     let mut client = HttpClient::new();
//!     client.configure(|config| {
//!         config
//!             .with_base_url("/api/")
//!             .with_defaults(
//!                 RequestInit::new().with_headers(HeaderSource::map([("X-Requested-With", "Fetch")])),
//!             )
//!             .use_standard_configuration()
//!     })?;
//!
//!     let users: Vec<String> = client.get("users").await?.json()?;
//!     println!("{}", users.len());
//!     Ok(())
//! }
//! ```

mod backends;
mod client;
mod config;
mod error;
mod headers;
mod interceptor;
mod request;
mod response;
mod transport;

#[cfg(feature = "reqwest")]
pub use backends::ReqwestTransport;
pub use client::{HttpClient, HttpClientBuilder};
pub use config::HttpClientConfiguration;
pub use error::HttpError;
pub use headers::{HeaderSource, HeaderValue, Headers};
pub use interceptor::{Interceptor, RejectErrorResponses, RequestOrResponse};
pub use request::{form, json, Body, Credentials, HttpRequest, RequestInit};
pub use response::HttpResponse;
pub use transport::Transport;
