//! Configuration types for the Paloma Shop client.
//!
//! # Overview
//!
//! - [`PalomaConfig`]: The configuration holding base URL, channel, locale and credentials
//! - [`PalomaConfigBuilder`]: A builder for constructing [`PalomaConfig`] instances
//! - [`BaseUrl`], [`Channel`], [`Locale`], [`ApiKey`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use paloma_shop::{PalomaConfig, BaseUrl, Channel, Locale};
//!
//! let config = PalomaConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com").unwrap())
//!     .channel(Channel::new("shop1").unwrap())
//!     .locale(Locale::new("de").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.locale().as_ref(), "de");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl, Channel, Locale};

use std::sync::Arc;

use crate::error::ConfigError;
use crate::session::SessionStore;

/// Configuration for a Paloma Shop client.
///
/// The configuration is read-only once built and is `Clone + Send + Sync`, so
/// a single instance can back any number of concurrent clients.
#[derive(Clone, Debug)]
pub struct PalomaConfig {
    base_url: BaseUrl,
    channel: Channel,
    locale: Locale,
    api_key: Option<ApiKey>,
    user_agent_prefix: Option<String>,
    session: Option<Arc<dyn SessionStore>>,
}

impl PalomaConfig {
    /// Creates a new builder for constructing a `PalomaConfig`.
    #[must_use]
    pub fn builder() -> PalomaConfigBuilder {
        PalomaConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the storefront channel.
    #[must_use]
    pub const fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Returns the locale used for order paths.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Returns the API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the injected session store, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Arc<dyn SessionStore>> {
        self.session.as_ref()
    }
}

// Verify PalomaConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PalomaConfig>();
};

/// Builder for constructing [`PalomaConfig`] instances.
///
/// `base_url` and `channel` are required.
///
/// # Defaults
///
/// - `locale`: `en`
/// - `api_key`: `None`
/// - `user_agent_prefix`: `None`
/// - `session`: `None` (clients create a [`MemorySession`](crate::MemorySession))
#[derive(Debug, Default)]
pub struct PalomaConfigBuilder {
    base_url: Option<BaseUrl>,
    channel: Option<Channel>,
    locale: Option<Locale>,
    api_key: Option<ApiKey>,
    user_agent_prefix: Option<String>,
    session: Option<Arc<dyn SessionStore>>,
}

impl PalomaConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the storefront channel (required).
    #[must_use]
    pub fn channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Sets the locale for order paths.
    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Sets the API key sent with every request.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Injects a session store shared with the surrounding application.
    #[must_use]
    pub fn session(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Builds the [`PalomaConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` or
    /// `channel` are not set.
    pub fn build(self) -> Result<PalomaConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;
        let channel = self
            .channel
            .ok_or(ConfigError::MissingRequiredField { field: "channel" })?;

        Ok(PalomaConfig {
            base_url,
            channel,
            locale: self.locale.unwrap_or_default(),
            api_key: self.api_key,
            user_agent_prefix: self.user_agent_prefix,
            session: self.session,
        })
    }
}
