//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated API base URL.
///
/// The URL must carry a scheme and a host. A trailing `/` is trimmed so that
/// paths can always be joined with a single separator.
///
/// # Example
///
/// ```rust
/// use paloma_shop::BaseUrl;
///
/// let url = BaseUrl::new("https://api.example.com/api/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com/api");
/// assert_eq!(url.join("shop1/customers"), "https://api.example.com/api/shop1/customers");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        // Query strings and fragments cannot be joined with resource paths.
        if url[host_end..].contains(['?', '#']) {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(url))
    }

    /// Joins a relative path onto this base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated storefront channel.
///
/// The channel is the tenant segment prefixed to every API path. It is used
/// verbatim, so only URL-unreserved characters are accepted.
///
/// # Example
///
/// ```rust
/// use paloma_shop::Channel;
///
/// let channel = Channel::new("shop1").unwrap();
/// assert_eq!(channel.as_ref(), "shop1");
/// assert!(Channel::new("a/b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Channel(String);

impl Channel {
    /// Creates a new validated channel.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyChannel`] if the channel is empty, or
    /// [`ConfigError::InvalidChannel`] if it contains anything other than
    /// ASCII letters, digits, `-`, `_`, `.` and `~`.
    pub fn new(channel: impl Into<String>) -> Result<Self, ConfigError> {
        let channel = channel.into();
        if channel.is_empty() {
            return Err(ConfigError::EmptyChannel);
        }
        let unreserved = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~');
        if !channel.chars().all(unreserved) {
            return Err(ConfigError::InvalidChannel { channel });
        }
        Ok(Self(channel))
    }
}

impl AsRef<str> for Channel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Channel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated locale code such as `en`, `de-CH` or `fr_CH`.
///
/// The locale is prefixed to order-related paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Creates a new validated locale.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLocale`] if the locale is empty or contains
    /// anything other than ASCII letters, digits, `-` and `_`.
    pub fn new(locale: impl Into<String>) -> Result<Self, ConfigError> {
        let locale = locale.into();
        let valid = !locale.is_empty()
            && locale
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ConfigError::InvalidLocale { locale });
        }
        Ok(Self(locale))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated API key, sent as the `x-api-key` header.
///
/// # Security
///
/// The `Debug` implementation masks the key, displaying only `ApiKey(*****)`.
///
/// # Example
///
/// ```rust
/// use paloma_shop::ApiKey;
///
/// let key = ApiKey::new("my-key").unwrap();
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}
