//! Error types for the Paloma Shop client.
//!
//! This module contains error types used throughout the crate for configuration
//! and validation errors. Transport errors live in [`crate::clients`].
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation.
//!
//! # Example
//!
//! ```rust
//! use paloma_shop::{Channel, ConfigError};
//!
//! let result = Channel::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyChannel)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Channel cannot be empty.
    #[error("Channel cannot be empty. Please provide the storefront channel identifier.")]
    EmptyChannel,

    /// Channel contains characters that would need escaping in a URL path.
    #[error("Invalid channel '{channel}'. A channel may only contain letters, digits, '-', '_', '.' and '~'.")]
    InvalidChannel {
        /// The invalid channel that was provided.
        channel: String,
    },

    /// Locale is invalid.
    #[error("Invalid locale '{locale}'. Expected a language tag such as 'en' or 'de_CH'.")]
    InvalidLocale {
        /// The invalid locale that was provided.
        locale: String,
    },

    /// API key cannot be empty.
    #[error("API key cannot be empty. Omit the key instead of passing an empty value.")]
    EmptyApiKey,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
