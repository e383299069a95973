//! HTTP client for Paloma API communication.
//!
//! This module provides the [`HttpClient`] type, the reqwest-backed
//! [`Transport`] used by default.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{DataType, HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::{BaseUrl, PalomaConfig};

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Paloma API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent and the optional API key
/// - JSON and form-encoded bodies
/// - Mapping non-2xx responses to [`HttpError::Response`]
///
/// Requests are attempted exactly once.
///
/// # Example
///
/// ```rust,ignore
/// use paloma_shop::{HttpClient, HttpRequest, HttpMethod, PalomaConfig};
///
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "shop1/customers/cust-1")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL all request paths are joined onto.
    base_url: BaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &PalomaConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_reqwest_client(config, client))
    }

    /// Creates a new HTTP client around an existing reqwest client.
    ///
    /// Use this to share a connection pool or to apply timeouts and proxies.
    #[must_use]
    pub fn with_reqwest_client(config: &PalomaConfig, client: reqwest::Client) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Paloma Shop Client v{CLIENT_VERSION} | Rust");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if let Some(api_key) = config.api_key() {
            default_headers.insert("x-api-key".to_string(), api_key.as_ref().to_string());
        }

        Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the absolute URL a request is sent to, without the query.
    ///
    /// The request path is used verbatim; segments must already be escaped.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        self.base_url.join(&request.path)
    }

    /// Sends an HTTP request to the Paloma API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - A 2xx response body is not valid JSON (`Deserialization`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request);
        tracing::debug!(method = %request.http_method, %url, "Sending Paloma API request");

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = match request.body_type {
                Some(DataType::Form) => req_builder.form(&request.form_pairs()),
                _ => req_builder
                    .header("Content-Type", DataType::Json.as_content_type())
                    .body(body.to_string()),
            };
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        if (200..=299).contains(&code) {
            let body = if body_text.trim().is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::from_str(&body_text)
                    .map_err(|source| HttpError::Deserialization { code, source })?
            };

            let response = HttpResponse::new(code, res_headers, body);
            if let Some(deprecation) = response.deprecation() {
                tracing::warn!(
                    "Deprecated request to Paloma API at {}, received deprecation: {}",
                    request.path,
                    deprecation
                );
            }
            return Ok(response);
        }

        // Error bodies are informational only; keep whatever parses.
        let body = serde_json::from_str(&body_text).unwrap_or_else(|_| {
            if body_text.is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::json!({ "raw_body": body_text })
            }
        });
        let response = HttpResponse::new(code, res_headers, body);

        tracing::debug!(code, path = %request.path, "Paloma API returned an error status");

        Err(HttpError::Response(HttpResponseError {
            code,
            message: Self::serialize_error(&response),
            error_reference: response.request_id().map(String::from),
        }))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Serializes an error response to a compact JSON message.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for field in ["message", "errors", "error", "raw_body"] {
            if let Some(value) = response.body.get(field) {
                error_body.insert(field.to_string(), value.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Transport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.request(request).await
    }
}
