//! Interceptor trait and the standard error-response interceptor
//!
//! An interceptor bundles up to four optional handlers observing or
//! transforming outgoing requests and incoming responses. Every handler has a
//! default implementation: success handlers pass the value through unchanged
//! and failure handlers rethrow, so implementors only override what they need.

use async_trait::async_trait;

use crate::error::HttpError;
use crate::request::HttpRequest;
use crate::response::HttpResponse;

/// Outcome of a request-phase handler: continue with a (possibly replaced)
/// request, or short-circuit the transport with a ready response
#[derive(Debug)]
pub enum RequestOrResponse {
    /// Continue the pipeline with this request
    Request(HttpRequest),
    /// Skip the transport and feed this response to the response phase
    Response(HttpResponse),
}

/// Hooks into the request/response pipeline
///
/// Interceptors run in registration order for both phases. A handler that is
/// not overridden is transparent.
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Observe or transform an outgoing request, or short-circuit with a
    /// response
    async fn request(&self, request: HttpRequest) -> Result<RequestOrResponse, HttpError> {
        Ok(RequestOrResponse::Request(request))
    }

    /// Handle a failure from an earlier request handler; may recover by
    /// returning a request or response
    async fn request_error(&self, error: HttpError) -> Result<RequestOrResponse, HttpError> {
        Err(error)
    }

    /// Observe or transform an incoming response
    async fn response(
        &self,
        response: HttpResponse,
        _request: &HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        Ok(response)
    }

    /// Handle a transport failure or an earlier response handler's failure;
    /// may recover by returning a substitute response
    async fn response_error(
        &self,
        error: HttpError,
        _request: &HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        Err(error)
    }
}

/// Rejects responses with a non-success status
///
/// Appended by
/// [`use_standard_configuration`](crate::HttpClientConfiguration::use_standard_configuration);
/// turns a non-2xx response into [`HttpError::Status`] carrying the response,
/// so HTTP-level failures surface the same way network failures do.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectErrorResponses;

#[async_trait]
impl Interceptor for RejectErrorResponses {
    async fn response(
        &self,
        response: HttpResponse,
        _request: &HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(HttpError::Status(Box::new(response)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Transparent;
    impl Interceptor for Transparent {}

    #[tokio::test]
    async fn test_default_request_handler_is_identity() {
        let request = HttpRequest::new("GET", "/x").with_header("X-Test", "1");
        let result = Transparent.request(request).await;

        match result {
            Ok(RequestOrResponse::Request(request)) => {
                assert_eq!(request.url(), "/x");
                assert_eq!(request.headers().get("x-test"), Some("1"));
            }
            _ => panic!("Expected the request to pass through"),
        }
    }

    #[tokio::test]
    async fn test_default_request_error_handler_rethrows() {
        let result = Transparent
            .request_error(HttpError::Other("boom".to_string()))
            .await;

        match result {
            Err(HttpError::Other(msg)) => assert_eq!(msg, "boom"),
            _ => panic!("Expected the error to propagate unchanged"),
        }
    }

    #[tokio::test]
    async fn test_default_response_handler_is_identity() {
        let request = HttpRequest::new("GET", "/x");
        let response = HttpResponse::new(204);
        let result = Transparent.response(response.clone(), &request).await;

        assert_eq!(result.expect("Response should pass through"), response);
    }

    #[tokio::test]
    async fn test_default_response_error_handler_rethrows() {
        let request = HttpRequest::new("GET", "/x");
        let result = Transparent
            .response_error(HttpError::Connection("down".to_string()), &request)
            .await;

        assert!(matches!(result, Err(HttpError::Connection(_))));
    }

    #[tokio::test]
    async fn test_reject_error_responses_passes_success() {
        let request = HttpRequest::new("GET", "/x");
        let response = HttpResponse::new(200).with_body_text("ok");
        let result = RejectErrorResponses.response(response.clone(), &request).await;

        assert_eq!(result.expect("2xx should pass through"), response);
    }

    #[tokio::test]
    async fn test_reject_error_responses_rejects_failure_with_response() {
        let request = HttpRequest::new("GET", "/x");
        let response = HttpResponse::new(404).with_body_text("missing");
        let result = RejectErrorResponses.response(response, &request).await;

        match result {
            Err(HttpError::Status(response)) => {
                assert_eq!(response.status(), 404);
                assert_eq!(response.text().expect("Body should be UTF-8"), "missing");
            }
            _ => panic!("Expected HttpError::Status"),
        }
    }
}
