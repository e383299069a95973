//! HTTP response types for the Paloma Shop client.

use std::collections::HashMap;

/// An HTTP response from the Paloma API.
///
/// Header names are stored lower-cased; a header may carry several values.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body. Empty bodies are `null`.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns the first value of the named header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `Deprecation` header value, if present.
    ///
    /// When present, the server has flagged the endpoint as deprecated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paloma_shop::HttpResponse;
    /// use std::collections::HashMap;
    /// use serde_json::json;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert("deprecation".to_string(), vec!["true".to_string()]);
    ///
    /// let response = HttpResponse::new(200, headers, json!({}));
    /// assert_eq!(response.deprecation(), Some("true"));
    /// ```
    #[must_use]
    pub fn deprecation(&self) -> Option<&str> {
        self.header("deprecation")
    }

    /// Consumes the response and returns its body.
    #[must_use]
    pub fn into_body(self) -> serde_json::Value {
        self.body
    }
}
