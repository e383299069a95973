//! Customer, user, order and address operations.
//!
//! [`CustomersClient`] exposes one method per remote operation:
//!
//! | Area | Methods |
//! |---|---|
//! | Customers | `register`, `get_customer`, `update_customer`, `update_address`, `confirm_email_address`, `exists` |
//! | Users | `authenticate_user`, `update_user_password`, `start_user_password_reset`, `get_user_password_reset_token`, `finish_user_password_reset` |
//! | Advertising | `update_advertising_preferences`, `create_advertising_prefs`, `confirm_advertising_prefs` |
//! | Loyalty programs | `get_loyalty_programs`, `update_loyalty_programs` |
//! | Orders | `get_orders`, `get_order`, `get_order_receipt`, `get_order_status` |
//! | Addresses | `address_complete_house`, `address_complete_street`, `address_complete_zip`, `address_complete_street_and_house`, `address_validate` |
//!
//! Order paths carry the locale after the channel; all other paths do not.

mod client;
mod models;

pub use client::CustomersClient;
pub use models::{
    AdvertisingConfirmation, EmailConfirmation, NewPassword, OrderListQuery,
    PasswordResetRequest, UserCredentials,
};
