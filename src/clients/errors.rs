//! HTTP-specific error types for the Paloma Shop client.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! The customers client never translates these errors; whatever the transport
//! reports reaches the caller as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use paloma_shop::HttpError;
//!
//! match client.get_customer("cust-1").await {
//!     Ok(customer) => println!("{customer}"),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::Deserialization { code, source }) => println!("bad body ({code}): {source}"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The message field contains JSON with any of these fields from the response:
/// - `message`: Error message reported by the API
/// - `errors`: Validation errors reported by the API
/// - `error_reference`: Debugging reference including `X-Request-Id`
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from `X-Request-Id` header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A path identifier would not survive URL normalization as its own segment.
    #[error("Invalid path segment '{segment}': identifiers must be non-empty and not '.' or '..'.")]
    InvalidPathSegment {
        /// The rejected identifier.
        segment: String,
    },

    /// The request payload could not be encoded.
    #[error("Cannot encode request body: {reason}")]
    UnencodableBody {
        /// Why encoding failed.
        reason: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A successful response carried a body that is not valid JSON.
    #[error("Malformed response body (HTTP {code}): {source}")]
    Deserialization {
        /// The HTTP status code of the response.
        code: u16,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::Deserialization { code, .. } => Some(*code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}
