//! Request payloads with a fixed wire shape.
//!
//! Free-form payloads (customers, addresses, advertising preferences, loyalty
//! programs) are passed through as any `Serialize` value and are not modelled
//! here.

use std::collections::HashMap;

use serde::Serialize;

/// Body of `POST {channel}/customers/email-address/confirm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmailConfirmation<'a> {
    pub token: &'a str,
}

/// Body of `POST {channel}/users/authenticate`.
#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl std::fmt::Debug for UserCredentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("username", &self.username)
            .field("password", &"*****")
            .finish()
    }
}

/// Body of `POST {channel}/users/password-reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest<'a> {
    pub email_address: &'a str,
    /// URL the reset mail links back to; the API appends the token.
    pub confirmation_base_url: &'a str,
}

/// Body of `PUT {channel}/users/password-reset/{token}/password`.
#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewPassword<'a> {
    pub password: &'a str,
}

impl std::fmt::Debug for NewPassword<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NewPassword(*****)")
    }
}

/// Form body of `POST {channel}/advertising/confirm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvertisingConfirmation<'a> {
    pub token: &'a str,
}

/// Paging and sort options for listing a customer's orders.
///
/// Only the options that are set end up in the query string.
///
/// # Example
///
/// ```rust
/// use paloma_shop::OrderListQuery;
///
/// let query = OrderListQuery::new().page(2).size(20);
/// let params = query.to_query();
/// assert_eq!(params.len(), 2);
/// assert_eq!(params["page"], "2");
///
/// assert!(OrderListQuery::new().to_query().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// Sort order as understood by the API, e.g. `desc`.
    pub order: Option<String>,
}

impl OrderListQuery {
    /// Creates a query without any options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zero-based page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Returns the query parameters for the options that are set.
    #[must_use]
    pub fn to_query(&self) -> HashMap<String, String> {
        let mut query = HashMap::new();
        if let Some(page) = self.page {
            query.insert("page".to_string(), page.to_string());
        }
        if let Some(size) = self.size {
            query.insert("size".to_string(), size.to_string());
        }
        if let Some(order) = &self.order {
            query.insert("order".to_string(), order.clone());
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_reset_request_uses_camel_case() {
        let body = PasswordResetRequest {
            email_address: "a@b.c",
            confirmation_base_url: "https://shop.test/reset",
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"emailAddress": "a@b.c", "confirmationBaseUrl": "https://shop.test/reset"})
        );
    }

    #[test]
    fn test_credentials_debug_masks_password() {
        let credentials = UserCredentials {
            username: "jane",
            password: "hunter2",
        };
        let debug_str = format!("{credentials:?}");
        assert!(debug_str.contains("jane"));
        assert!(!debug_str.contains("hunter2"));
        assert!(!format!("{:?}", NewPassword { password: "hunter2" }).contains("hunter2"));
    }

    #[test]
    fn test_order_query_omits_unset_options() {
        let query = OrderListQuery::new().order("desc").to_query();
        assert_eq!(query.len(), 1);
        assert_eq!(query.get("order"), Some(&"desc".to_string()));
    }

    #[test]
    fn test_order_query_with_all_options() {
        let query = OrderListQuery::new().page(0).size(10).order("asc").to_query();
        assert_eq!(query.get("page"), Some(&"0".to_string()));
        assert_eq!(query.get("size"), Some(&"10".to_string()));
        assert_eq!(query.get("order"), Some(&"asc".to_string()));
    }
}
