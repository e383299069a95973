//! HTTP transport layer for Paloma API communication.
//!
//! This module provides the request/response types the customers client
//! builds and consumes, the [`Transport`] seam, and the reqwest-backed
//! [`HttpClient`].
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`Transport`]: The trait any request sender implements
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT)
//! - [`DataType`]: Content types for request bodies (JSON, form)
//!
//! # Retry Behavior
//!
//! There is none. Each request is attempted once and failures are returned
//! to the caller unchanged.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use transport::Transport;
