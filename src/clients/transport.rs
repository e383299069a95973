//! The transport seam between the customers client and the network.

use std::future::Future;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Sends a single [`HttpRequest`] and returns its response.
///
/// [`HttpClient`](crate::HttpClient) is the production implementation.
/// Implementations own everything below request construction: URL
/// composition, headers, connection handling, timeouts and mapping non-2xx
/// statuses to [`HttpError::Response`]. Each call must perform at most one
/// attempt.
///
/// # Example
///
/// ```rust
/// use std::future::Future;
/// use std::collections::HashMap;
/// use paloma_shop::{HttpError, HttpRequest, HttpResponse, Transport};
///
/// #[derive(Debug)]
/// struct Echo;
///
/// impl Transport for Echo {
///     fn send(
///         &self,
///         request: HttpRequest,
///     ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
///         async move {
///             let body = serde_json::json!({ "path": request.path });
///             Ok(HttpResponse::new(200, HashMap::new(), body))
///         }
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response, or the error the transport
    /// encountered.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).send(request)
    }
}
