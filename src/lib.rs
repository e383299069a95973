//! # Paloma Shop Rust Client
//!
//! A typed async client for the Paloma Shop customers API: registration,
//! authentication, password reset, address completion and validation,
//! orders, loyalty programs and advertising preferences.
//!
//! ## Overview
//!
//! - Type-safe configuration via [`PalomaConfig`] and [`PalomaConfigBuilder`]
//! - Validated newtypes for the base URL, channel, locale and API key
//! - [`CustomersClient`] with one method per remote operation
//! - A [`Transport`] seam with a reqwest-backed [`HttpClient`]
//! - A pluggable [`SessionStore`] shared with the surrounding application
//!
//! ## Quick Start
//!
//! ```rust
//! use paloma_shop::{BaseUrl, Channel, Locale, PalomaConfig};
//!
//! let config = PalomaConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com").unwrap())
//!     .channel(Channel::new("shop1").unwrap())
//!     .locale(Locale::new("en").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use paloma_shop::{CustomersClient, OrderListQuery};
//!
//! let client = CustomersClient::new(&config)?;
//!
//! let customer = client.get_customer("cust-1").await?;
//! let orders = client
//!     .get_orders("cust-1", &OrderListQuery::new().page(0).size(20))
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **One call, one request**: no retries, caching or batching
//! - **Errors pass through**: transport failures reach the caller unchanged
//! - **No global state**: configuration is instance-based and read-only
//! - **Thread-safe**: all types are `Send + Sync`

pub mod clients;
pub mod config;
pub mod customers;
pub mod error;
pub mod session;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, BaseUrl, Channel, Locale, PalomaConfig, PalomaConfigBuilder};
pub use error::ConfigError;
pub use session::{MemorySession, SessionStore};

pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, Transport,
};

pub use customers::{CustomersClient, OrderListQuery};
