//! Customers client implementation.
//!
//! Every operation maps to exactly one request against
//! `{base_url}/{channel}[/{locale}]/...`. Identifiers are percent-encoded here,
//! once, before the path reaches the transport. An empty, `.` or `..`
//! identifier fails with [`InvalidHttpRequestError::InvalidPathSegment`] and
//! no request is sent.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, InvalidHttpRequestError, Transport,
};
use crate::config::{Channel, Locale, PalomaConfig};
use crate::customers::models::{
    AdvertisingConfirmation, EmailConfirmation, NewPassword, OrderListQuery,
    PasswordResetRequest, UserCredentials,
};
use crate::session::{MemorySession, SessionStore};

/// Client for the Paloma customers, users, orders and address API.
///
/// All operations return the response body as JSON, or the transport's
/// error unchanged. The client holds no mutable state and can be shared
/// across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use paloma_shop::{BaseUrl, Channel, CustomersClient, Locale, PalomaConfig};
///
/// let config = PalomaConfig::builder()
///     .base_url(BaseUrl::new("https://api.test").unwrap())
///     .channel(Channel::new("shop1").unwrap())
///     .locale(Locale::new("en").unwrap())
///     .build()
///     .unwrap();
///
/// let client = CustomersClient::new(&config)?;
///
/// // GET https://api.test/shop1/en/customers/cust-1/orders/ORD-42
/// let order = client.get_order("cust-1", "ORD-42").await?;
/// ```
#[derive(Debug)]
pub struct CustomersClient<T = HttpClient> {
    transport: T,
    channel: Channel,
    locale: Locale,
    session: Arc<dyn SessionStore>,
}

// Verify CustomersClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CustomersClient>();
};

impl CustomersClient<HttpClient> {
    /// Creates a client that talks to the configured base URL over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: &PalomaConfig) -> Result<Self, HttpError> {
        Ok(Self::with_transport(config, HttpClient::new(config)?))
    }
}

impl<T: Transport> CustomersClient<T> {
    /// Creates a client that sends its requests through `transport`.
    ///
    /// When the configuration carries no session, a fresh [`MemorySession`]
    /// is created.
    #[must_use]
    pub fn with_transport(config: &PalomaConfig, transport: T) -> Self {
        let session = config.session().map_or_else(
            || {
                tracing::debug!("No session configured, using an in-memory session");
                Arc::new(MemorySession::new()) as Arc<dyn SessionStore>
            },
            Arc::clone,
        );

        Self {
            transport,
            channel: config.channel().clone(),
            locale: config.locale().clone(),
            session,
        }
    }

    /// Returns the session store shared with the surrounding application.
    ///
    /// Requests never read from it.
    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Returns the transport requests are sent through.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the channel prefixed to every path.
    #[must_use]
    pub const fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Returns the locale prefixed to order paths.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    // === Customers ===

    /// Registers a new customer.
    ///
    /// `POST {channel}/customers`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `customer` cannot be encoded
    /// as JSON, or whatever error the transport reports.
    pub async fn register<C>(&self, customer: &C) -> Result<Value, HttpError>
    where
        C: Serialize + ?Sized,
    {
        self.post(self.channel_path("customers"), customer).await
    }

    /// Fetches a customer.
    ///
    /// `GET {channel}/customers/{customer_id}`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn get_customer(&self, customer_id: &str) -> Result<Value, HttpError> {
        let path = self.channel_path(&format!("customers/{}", segment(customer_id)?));
        self.get(path, None).await
    }

    /// Replaces a customer's data.
    ///
    /// `PUT {channel}/customers/{customer_id}`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `customer` cannot be encoded
    /// as JSON, or whatever error the transport reports.
    pub async fn update_customer<C>(&self, customer_id: &str, customer: &C) -> Result<Value, HttpError>
    where
        C: Serialize + ?Sized,
    {
        let path = self.channel_path(&format!("customers/{}", segment(customer_id)?));
        self.put(path, customer).await
    }

    /// Replaces one of a customer's addresses (e.g. `billing`).
    ///
    /// `PUT {channel}/customers/{customer_id}/addresses/{address_type}`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `address` cannot be encoded
    /// as JSON, or whatever error the transport reports.
    pub async fn update_address<A>(
        &self,
        customer_id: &str,
        address_type: &str,
        address: &A,
    ) -> Result<Value, HttpError>
    where
        A: Serialize + ?Sized,
    {
        let path = self.channel_path(&format!(
            "customers/{}/addresses/{}",
            segment(customer_id)?,
            segment(address_type)?
        ));
        self.put(path, address).await
    }

    /// Confirms a customer's email address with the token from the confirmation mail.
    ///
    /// `POST {channel}/customers/email-address/confirm` with `{"token": ...}`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn confirm_email_address(&self, token: &str) -> Result<Value, HttpError> {
        self.post(
            self.channel_path("customers/email-address/confirm"),
            &EmailConfirmation { token },
        )
        .await
    }

    /// Checks whether a customer with this email address exists.
    ///
    /// `GET {channel}/customers/exists?emailAddress=...`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn exists(&self, email_address: &str) -> Result<Value, HttpError> {
        let query = HashMap::from([("emailAddress".to_string(), email_address.to_string())]);
        self.get(self.channel_path("customers/exists"), Some(query))
            .await
    }

    // === Users ===

    /// Authenticates a user.
    ///
    /// `POST {channel}/users/authenticate` with `{"username", "password"}`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> Result<Value, HttpError> {
        self.post(
            self.channel_path("users/authenticate"),
            &UserCredentials { username, password },
        )
        .await
    }

    /// Changes the password of a user.
    ///
    /// `PUT {channel}/users/password`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `password` cannot be encoded
    /// as JSON, or whatever error the transport reports.
    pub async fn update_user_password<P>(&self, password: &P) -> Result<Value, HttpError>
    where
        P: Serialize + ?Sized,
    {
        self.put(self.channel_path("users/password"), password).await
    }

    /// Starts a password reset and sends the reset mail.
    ///
    /// `POST {channel}/users/password-reset` with
    /// `{"emailAddress", "confirmationBaseUrl"}`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn start_user_password_reset(
        &self,
        email_address: &str,
        confirmation_base_url: &str,
    ) -> Result<Value, HttpError> {
        self.post(
            self.channel_path("users/password-reset"),
            &PasswordResetRequest {
                email_address,
                confirmation_base_url,
            },
        )
        .await
    }

    /// Looks up a password reset token.
    ///
    /// `GET {channel}/users/password-reset/{token}`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn get_user_password_reset_token(&self, token: &str) -> Result<Value, HttpError> {
        let path = self.channel_path(&format!("users/password-reset/{}", segment(token)?));
        self.get(path, None).await
    }

    /// Completes a password reset.
    ///
    /// `PUT {channel}/users/password-reset/{token}/password` with `{"password"}`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn finish_user_password_reset(
        &self,
        token: &str,
        password: &str,
    ) -> Result<Value, HttpError> {
        let path = self.channel_path(&format!(
            "users/password-reset/{}/password",
            segment(token)?
        ));
        self.put(path, &NewPassword { password }).await
    }

    // === Advertising ===

    /// Replaces a customer's advertising preferences.
    ///
    /// `PUT {channel}/customers/{customer_id}/advertising`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `prefs` cannot be encoded
    /// as JSON, or whatever error the transport reports.
    pub async fn update_advertising_preferences<A>(
        &self,
        customer_id: &str,
        prefs: &A,
    ) -> Result<Value, HttpError>
    where
        A: Serialize + ?Sized,
    {
        let path = self.channel_path(&format!("customers/{}/advertising", segment(customer_id)?));
        self.put(path, prefs).await
    }

    /// Creates advertising preferences for a visitor without an account.
    ///
    /// `POST {channel}/advertising` (JSON)
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `prefs` cannot be encoded
    /// as JSON, or whatever error the transport reports.
    pub async fn create_advertising_prefs<A>(&self, prefs: &A) -> Result<Value, HttpError>
    where
        A: Serialize + ?Sized,
    {
        self.post(self.channel_path("advertising"), prefs).await
    }

    /// Confirms advertising preferences (double opt-in).
    ///
    /// `POST {channel}/advertising/confirm`, form-encoded `token=...`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn confirm_advertising_prefs(&self, token: &str) -> Result<Value, HttpError> {
        self.post_form(
            self.channel_path("advertising/confirm"),
            &AdvertisingConfirmation { token },
        )
        .await
    }

    // === Loyalty programs ===

    /// Lists a customer's loyalty programs.
    ///
    /// `GET {channel}/customers/{customer_id}/loyalty-programs`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn get_loyalty_programs(&self, customer_id: &str) -> Result<Value, HttpError> {
        let path = self.channel_path(&format!(
            "customers/{}/loyalty-programs",
            segment(customer_id)?
        ));
        self.get(path, None).await
    }

    /// Adds or updates a customer's loyalty program.
    ///
    /// `POST {channel}/customers/{customer_id}/loyalty-programs`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `program` cannot be encoded
    /// as JSON, or whatever error the transport reports.
    pub async fn update_loyalty_programs<L>(
        &self,
        customer_id: &str,
        program: &L,
    ) -> Result<Value, HttpError>
    where
        L: Serialize + ?Sized,
    {
        let path = self.channel_path(&format!(
            "customers/{}/loyalty-programs",
            segment(customer_id)?
        ));
        self.post(path, program).await
    }

    // === Orders ===

    /// Lists a customer's orders.
    ///
    /// `GET {channel}/{locale}/customers/{customer_id}/orders[?page&size&order]`
    ///
    /// Unset options are omitted; with none set the request has no query.
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn get_orders(
        &self,
        customer_id: &str,
        options: &OrderListQuery,
    ) -> Result<Value, HttpError> {
        let path = self.locale_path(&format!("customers/{}/orders", segment(customer_id)?));
        self.get(path, Some(options.to_query())).await
    }

    /// Fetches one of a customer's orders.
    ///
    /// `GET {channel}/{locale}/customers/{customer_id}/orders/{order_nr}`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn get_order(&self, customer_id: &str, order_nr: &str) -> Result<Value, HttpError> {
        let path = self.locale_path(&format!(
            "customers/{}/orders/{}",
            segment(customer_id)?,
            segment(order_nr)?
        ));
        self.get(path, None).await
    }

    /// Fetches the receipt of one of a customer's orders.
    ///
    /// `GET {channel}/{locale}/customers/{customer_id}/orders/{order_nr}/receipt`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn get_order_receipt(
        &self,
        customer_id: &str,
        order_nr: &str,
    ) -> Result<Value, HttpError> {
        let path = self.locale_path(&format!(
            "customers/{}/orders/{}/receipt",
            segment(customer_id)?,
            segment(order_nr)?
        ));
        self.get(path, None).await
    }

    /// Fetches the status of an order without customer context.
    ///
    /// `GET {channel}/{locale}/orders/{order_nr}/status`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn get_order_status(&self, order_nr: &str) -> Result<Value, HttpError> {
        let path = self.locale_path(&format!("orders/{}/status", segment(order_nr)?));
        self.get(path, None).await
    }

    // === Addresses ===

    /// Completes house numbers.
    ///
    /// `GET {channel}/address/complete/house?country&zipCode&street&house`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn address_complete_house(
        &self,
        country: &str,
        zip_code: &str,
        street: &str,
        house: &str,
    ) -> Result<Value, HttpError> {
        self.address_complete(
            "house",
            &[
                ("country", country),
                ("zipCode", zip_code),
                ("street", street),
                ("house", house),
            ],
        )
        .await
    }

    /// Completes street names.
    ///
    /// `GET {channel}/address/complete/street?country&zipCode&street`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn address_complete_street(
        &self,
        country: &str,
        zip_code: &str,
        street: &str,
    ) -> Result<Value, HttpError> {
        self.address_complete(
            "street",
            &[("country", country), ("zipCode", zip_code), ("street", street)],
        )
        .await
    }

    /// Completes zip codes and cities from a combined input.
    ///
    /// `GET {channel}/address/complete/zip?country&zipCity`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn address_complete_zip(&self, country: &str, zip_city: &str) -> Result<Value, HttpError> {
        self.address_complete("zip", &[("country", country), ("zipCity", zip_city)])
            .await
    }

    /// Completes a combined street and house number input.
    ///
    /// `GET {channel}/address/complete/street-and-house?country&zipCode&streetAndHouse`
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport reports.
    pub async fn address_complete_street_and_house(
        &self,
        country: &str,
        zip_code: &str,
        street_and_house: &str,
    ) -> Result<Value, HttpError> {
        self.address_complete(
            "street-and-house",
            &[
                ("country", country),
                ("zipCode", zip_code),
                ("streetAndHouse", street_and_house),
            ],
        )
        .await
    }

    /// Validates an address.
    ///
    /// `POST {channel}/address/validate`
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if `address` cannot be encoded
    /// as JSON, or whatever error the transport reports.
    pub async fn address_validate<A>(&self, address: &A) -> Result<Value, HttpError>
    where
        A: Serialize + ?Sized,
    {
        self.post(self.channel_path("address/validate"), address).await
    }

    // === Request plumbing ===

    fn channel_path(&self, resource: &str) -> String {
        format!("{}/{resource}", self.channel)
    }

    fn locale_path(&self, resource: &str) -> String {
        format!("{}/{}/{resource}", self.channel, self.locale)
    }

    async fn address_complete(
        &self,
        variant: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, HttpError> {
        let query = params
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        let path = self.channel_path(&format!("address/complete/{variant}"));
        self.get(path, Some(query)).await
    }

    async fn get(
        &self,
        path: String,
        query: Option<HashMap<String, String>>,
    ) -> Result<Value, HttpError> {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    async fn post<B>(&self, path: String, body: &B) -> Result<Value, HttpError>
    where
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.make_request(HttpMethod::Post, path, Some((body, DataType::Json)), None)
            .await
    }

    async fn put<B>(&self, path: String, body: &B) -> Result<Value, HttpError>
    where
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.make_request(HttpMethod::Put, path, Some((body, DataType::Json)), None)
            .await
    }

    async fn post_form<B>(&self, path: String, body: &B) -> Result<Value, HttpError>
    where
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.make_request(HttpMethod::Post, path, Some((body, DataType::Form)), None)
            .await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: String,
        body: Option<(Value, DataType)>,
        query: Option<HashMap<String, String>>,
    ) -> Result<Value, HttpError> {
        let mut builder = HttpRequest::builder(method, path);

        if let Some((body, body_type)) = body {
            builder = builder.body(body).body_type(body_type);
        }

        if let Some(query) = query {
            builder = builder.query(query);
        }

        let request = builder.build()?;
        let response = self.transport.send(request).await?;
        Ok(response.into_body())
    }
}

/// Percent-encodes a value for use as a single path segment.
///
/// Empty, `.` and `..` values are rejected: URL normalization would drop or
/// collapse them and the request would reach a different resource.
fn segment(value: &str) -> Result<Cow<'_, str>, InvalidHttpRequestError> {
    if matches!(value, "" | "." | "..") {
        return Err(InvalidHttpRequestError::InvalidPathSegment {
            segment: value.to_string(),
        });
    }
    Ok(urlencoding::encode(value))
}

fn encode_body<B>(body: &B) -> Result<Value, InvalidHttpRequestError>
where
    B: Serialize + ?Sized,
{
    serde_json::to_value(body).map_err(|e| InvalidHttpRequestError::UnencodableBody {
        reason: e.to_string(),
    })
}
